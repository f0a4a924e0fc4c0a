//! Per-type enrichers: raw rows + lore (+ auxiliary tables) -> fixed-shape entities.
//!
//! Every enricher emits exactly one entity per input row, in row order, and
//! fills every field (defaults such as "Unknown", "None", 0 or empty collections
//! stand in for missing values).

pub mod armor;
pub mod ash_of_war;
pub mod boss;
pub mod creature;
pub mod location;
pub mod npc;
pub mod skill;
pub mod spell;
pub mod weapon;

pub use armor::{enrich_armors, Armor};
pub use ash_of_war::{enrich_ashes_of_war, AshOfWar};
pub use boss::{enrich_bosses, Boss};
pub use creature::{enrich_creatures, Creature};
pub use location::{enrich_locations, Location};
pub use npc::{enrich_npcs, Npc};
pub use skill::{enrich_skills, Skill};
pub use spell::{enrich_spells, Spell, SpellSchool};
pub use weapon::{enrich_weapons, Weapon};

use crate::config::{PipelineConfig, ScoringConfig};
use crate::data::lookup::{FuzzyMap, FuzzyOptions};
use crate::data::lore::LoreLibrary;
use crate::data::table::{RawRecord, RecordSet};

/// Shared read-only inputs for every enricher in a run.
#[derive(Debug, Clone, Copy)]
pub struct EnrichContext<'a> {
    pub lore: &'a LoreLibrary,
    pub fuzzy: FuzzyOptions,
    pub scoring: &'a ScoringConfig,
}

impl<'a> EnrichContext<'a> {
    pub fn new(lore: &'a LoreLibrary, config: &'a PipelineConfig) -> Self {
        Self {
            lore,
            fuzzy: config.fuzzy_options(),
            scoring: &config.scoring,
        }
    }

    pub fn lore_for(&self, name: &str) -> String {
        self.lore.lookup(name, &self.fuzzy)
    }
}

/// Build a fuzzy-resolvable lookup from an auxiliary table, keyed by the
/// normalized value of `key_column` (missing keys normalize to "").
pub fn keyed_lookup<T>(
    table: &RecordSet,
    key_column: &str,
    build: impl Fn(&RawRecord) -> T,
) -> FuzzyMap<T> {
    let mut lookup = FuzzyMap::new();
    for row in table {
        let key = row.text_opt(key_column).unwrap_or_default();
        lookup.insert(&key, build(row));
    }
    lookup
}
