//! Run orchestration: load -> enrich -> index -> assemble -> write.
//!
//! Stage order is fixed. Weapons are enriched and indexed before bosses,
//! because boss recommendations read the finished weapon index.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data::loader::{load_all, LoadedSources};
use crate::data::lookup::FuzzyMap;
use crate::enrich::{
    enrich_armors, enrich_ashes_of_war, enrich_bosses, enrich_creatures, enrich_locations,
    enrich_npcs, enrich_skills, enrich_spells, enrich_weapons, Armor, AshOfWar, Boss, Creature,
    EnrichContext, Location, Npc, Skill, Spell, SpellSchool, Weapon,
};
use crate::error::FuseError;
use crate::index::{ArmorIndex, LocationIndex, WeaponIndex, WeaponIndexSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub total_weapons: usize,
    pub total_bosses: usize,
    pub total_sorceries: usize,
    pub total_incantations: usize,
    pub total_npcs: usize,
    pub total_locations: usize,
    pub total_armors: usize,
    pub total_creatures: usize,
    pub total_ashes_of_war: usize,
    pub total_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indexes {
    pub weapon_index_summary: WeaponIndexSummary,
    pub location_index: LocationIndex,
    pub armor_types: Vec<String>,
}

/// The output document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDocument {
    pub metadata: Metadata,
    pub weapons: Vec<Weapon>,
    pub bosses: Vec<Boss>,
    pub sorceries: Vec<Spell>,
    pub incantations: Vec<Spell>,
    pub npcs: Vec<Npc>,
    pub locations: Vec<Location>,
    pub armors: Vec<Armor>,
    pub creatures: Vec<Creature>,
    pub ashes_of_war: Vec<AshOfWar>,
    pub skills: Vec<Skill>,
    pub indexes: Indexes,
}

impl EnrichedDocument {
    /// Boss by fuzzy name, with the run's cutoff and metric.
    pub fn find_boss(&self, name: &str, config: &PipelineConfig) -> Option<&Boss> {
        let bosses: FuzzyMap<&Boss> = self
            .bosses
            .iter()
            .map(|boss| (boss.name.clone(), boss))
            .collect();
        bosses.resolve(name, &config.fuzzy_options()).copied()
    }

    pub fn to_json(&self) -> Result<String, FuseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Enrich and index already-loaded sources. Never fails; missing data yields
/// empty collections and default fields.
pub fn fuse(sources: &LoadedSources, config: &PipelineConfig) -> EnrichedDocument {
    let ctx = EnrichContext::new(&sources.lore, config);

    let weapons = enrich_weapons(&sources.weapons, &sources.weapon_stats, &ctx);
    let weapon_index = WeaponIndex::build(&weapons);
    let bosses = enrich_bosses(&sources.bosses, &sources.boss_stats, &weapon_index, &ctx);
    let weapon_index_summary = weapon_index.summary();

    let sorceries = enrich_spells(&sources.sorceries, SpellSchool::Sorceries, &ctx);
    let incantations = enrich_spells(&sources.incantations, SpellSchool::Incantations, &ctx);
    let npcs = enrich_npcs(&sources.npcs, &ctx);
    let locations = enrich_locations(&sources.locations, &ctx);
    let armors = enrich_armors(&sources.armors, &ctx);
    let creatures = enrich_creatures(&sources.creatures, &ctx);
    let ashes_of_war = enrich_ashes_of_war(&sources.ashes_of_war, &ctx);
    let skills = enrich_skills(&sources.skills, &ctx);

    let location_index = LocationIndex::build(&locations);
    let armor_types = ArmorIndex::build(&armors).types();

    let metadata = Metadata {
        total_weapons: weapons.len(),
        total_bosses: bosses.len(),
        total_sorceries: sorceries.len(),
        total_incantations: incantations.len(),
        total_npcs: npcs.len(),
        total_locations: locations.len(),
        total_armors: armors.len(),
        total_creatures: creatures.len(),
        total_ashes_of_war: ashes_of_war.len(),
        total_skills: skills.len(),
    };

    EnrichedDocument {
        metadata,
        weapons,
        bosses,
        sorceries,
        incantations,
        npcs,
        locations,
        armors,
        creatures,
        ashes_of_war,
        skills,
        indexes: Indexes {
            weapon_index_summary,
            location_index,
            armor_types,
        },
    }
}

pub fn write_document(document: &EnrichedDocument, path: &Path) -> Result<(), FuseError> {
    let payload = document.to_json()?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FuseError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, payload).map_err(|source| FuseError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Full run: load every source from `config`, fuse, and write the document.
pub fn run(config: &PipelineConfig) -> Result<EnrichedDocument, FuseError> {
    let sources = load_all(config);
    let document = fuse(&sources, config);
    write_document(&document, &config.output_path)?;
    info!(
        "wrote {} ({} weapons, {} bosses)",
        config.output_path.display(),
        document.metadata.total_weapons,
        document.metadata.total_bosses
    );
    Ok(document)
}
