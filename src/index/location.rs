//! Reverse lookups from boss, NPC and creature names to the locations that list them.

use indexmap::IndexMap;
use log::info;
use serde::Serialize;

use crate::data::lookup::normalize_name;
use crate::enrich::Location;

/// Keys are normalized entity names; values are location names in location order.
/// A name listed twice by one location appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationIndex {
    pub boss_to_locations: IndexMap<String, Vec<String>>,
    pub npc_to_locations: IndexMap<String, Vec<String>>,
    pub creature_to_locations: IndexMap<String, Vec<String>>,
}

impl LocationIndex {
    pub fn build(locations: &[Location]) -> Self {
        let mut index = LocationIndex::default();
        for location in locations {
            append(&mut index.boss_to_locations, &location.bosses, &location.name);
            append(&mut index.npc_to_locations, &location.npcs, &location.name);
            append(&mut index.creature_to_locations, &location.creatures, &location.name);
        }
        info!(
            "location index: {} bosses, {} npcs, {} creatures",
            index.boss_to_locations.len(),
            index.npc_to_locations.len(),
            index.creature_to_locations.len()
        );
        index
    }
}

fn append(map: &mut IndexMap<String, Vec<String>>, names: &[String], location: &str) {
    for name in names {
        map.entry(normalize_name(name))
            .or_default()
            .push(location.to_string());
    }
}
