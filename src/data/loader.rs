//! Load every configured source table plus the lore library. Graceful fallback when data missing:
//! an absent or unreadable source becomes an empty record set and the run continues.

use std::path::PathBuf;

use log::{info, warn};

use crate::config::PipelineConfig;
use crate::data::lore::LoreLibrary;
use crate::data::table::{read_table, RecordSet};

/// Every tabular source the pipeline reads, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Weapons,
    WeaponStats,
    BossStats,
    Bosses,
    Armors,
    Incantations,
    Sorceries,
    Npcs,
    Locations,
    Creatures,
    AshesOfWar,
    Skills,
}

impl SourceKind {
    pub const ALL: [SourceKind; 12] = [
        SourceKind::Weapons,
        SourceKind::WeaponStats,
        SourceKind::BossStats,
        SourceKind::Bosses,
        SourceKind::Armors,
        SourceKind::Incantations,
        SourceKind::Sorceries,
        SourceKind::Npcs,
        SourceKind::Locations,
        SourceKind::Creatures,
        SourceKind::AshesOfWar,
        SourceKind::Skills,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::WeaponStats => "weapon_stats",
            Self::BossStats => "boss_stats",
            Self::Bosses => "bosses",
            Self::Armors => "armors",
            Self::Incantations => "incantations",
            Self::Sorceries => "sorceries",
            Self::Npcs => "npcs",
            Self::Locations => "locations",
            Self::Creatures => "creatures",
            Self::AshesOfWar => "ashes_of_war",
            Self::Skills => "skills",
        }
    }

    pub fn file_name(self, config: &PipelineConfig) -> &str {
        let sources = &config.sources;
        match self {
            Self::Weapons => &sources.weapons,
            Self::WeaponStats => &sources.weapon_stats,
            Self::BossStats => &sources.boss_stats,
            Self::Bosses => &sources.bosses,
            Self::Armors => &sources.armors,
            Self::Incantations => &sources.incantations,
            Self::Sorceries => &sources.sorceries,
            Self::Npcs => &sources.npcs,
            Self::Locations => &sources.locations,
            Self::Creatures => &sources.creatures,
            Self::AshesOfWar => &sources.ashes_of_war,
            Self::Skills => &sources.skills,
        }
    }

    pub fn path(self, config: &PipelineConfig) -> PathBuf {
        config.source_path(self.file_name(config))
    }
}

/// Raw inputs of one run.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub weapons: RecordSet,
    pub weapon_stats: RecordSet,
    pub boss_stats: RecordSet,
    pub bosses: RecordSet,
    pub armors: RecordSet,
    pub incantations: RecordSet,
    pub sorceries: RecordSet,
    pub npcs: RecordSet,
    pub locations: RecordSet,
    pub creatures: RecordSet,
    pub ashes_of_war: RecordSet,
    pub skills: RecordSet,
    pub lore: LoreLibrary,
}

impl LoadedSources {
    pub fn get(&self, kind: SourceKind) -> &RecordSet {
        match kind {
            SourceKind::Weapons => &self.weapons,
            SourceKind::WeaponStats => &self.weapon_stats,
            SourceKind::BossStats => &self.boss_stats,
            SourceKind::Bosses => &self.bosses,
            SourceKind::Armors => &self.armors,
            SourceKind::Incantations => &self.incantations,
            SourceKind::Sorceries => &self.sorceries,
            SourceKind::Npcs => &self.npcs,
            SourceKind::Locations => &self.locations,
            SourceKind::Creatures => &self.creatures,
            SourceKind::AshesOfWar => &self.ashes_of_war,
            SourceKind::Skills => &self.skills,
        }
    }

    pub fn get_mut(&mut self, kind: SourceKind) -> &mut RecordSet {
        match kind {
            SourceKind::Weapons => &mut self.weapons,
            SourceKind::WeaponStats => &mut self.weapon_stats,
            SourceKind::BossStats => &mut self.boss_stats,
            SourceKind::Bosses => &mut self.bosses,
            SourceKind::Armors => &mut self.armors,
            SourceKind::Incantations => &mut self.incantations,
            SourceKind::Sorceries => &mut self.sorceries,
            SourceKind::Npcs => &mut self.npcs,
            SourceKind::Locations => &mut self.locations,
            SourceKind::Creatures => &mut self.creatures,
            SourceKind::AshesOfWar => &mut self.ashes_of_war,
            SourceKind::Skills => &mut self.skills,
        }
    }
}

/// Load one source. Returns an empty set (with a warning) when the file is missing or unreadable.
pub fn load_source(kind: SourceKind, config: &PipelineConfig) -> RecordSet {
    let path = kind.path(config);
    if !path.exists() {
        warn!("{} not found, skipping {}", path.display(), kind.as_str());
        return RecordSet::empty();
    }
    match read_table(&path) {
        Ok(table) => {
            info!("loaded {}: {} rows", kind.as_str(), table.len());
            table
        }
        Err(err) => {
            warn!("{err}; treating {} as empty", kind.as_str());
            RecordSet::empty()
        }
    }
}

pub fn load_all(config: &PipelineConfig) -> LoadedSources {
    let mut sources = LoadedSources::default();
    for kind in SourceKind::ALL {
        *sources.get_mut(kind) = load_source(kind, config);
    }
    sources.lore = LoreLibrary::load_or_empty(&config.lore_path);
    sources
}
