//! Weapon cross-reference index: by physical damage type, inflicted status,
//! category and primary scaling. Buckets keep first-insertion order.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::analysis::attributes::PhysicalDamage;
use crate::analysis::status::{detect_status, StatusEffect};
use crate::enrich::Weapon;

#[derive(Debug, Clone, Default)]
pub struct WeaponIndex<'a> {
    /// A multi-type weapon (`"Standard/Pierce"`) sits in every matching bucket.
    pub by_damage_type: IndexMap<PhysicalDamage, Vec<&'a Weapon>>,
    /// At most one bucket per weapon: the first keyword-table match.
    pub by_status: IndexMap<StatusEffect, Vec<&'a Weapon>>,
    pub by_category: IndexMap<String, Vec<&'a Weapon>>,
    pub by_scaling: IndexMap<String, Vec<&'a Weapon>>,
}

/// Bucket names exposed in the output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponIndexSummary {
    pub damage_types: Vec<PhysicalDamage>,
    pub status_effects: Vec<StatusEffect>,
    pub categories: Vec<String>,
}

impl<'a> WeaponIndex<'a> {
    pub fn build(weapons: &'a [Weapon]) -> Self {
        let mut index = WeaponIndex::default();
        for weapon in weapons {
            for kind in PhysicalDamage::parse_list(&weapon.damage_type) {
                index.by_damage_type.entry(kind).or_default().push(weapon);
            }
            if let Some(status) = detect_status(&weapon.passive_effect) {
                index.by_status.entry(status).or_default().push(weapon);
            }
            index
                .by_category
                .entry(weapon.category.clone())
                .or_default()
                .push(weapon);
            index
                .by_scaling
                .entry(weapon.primary_scaling.clone())
                .or_default()
                .push(weapon);
        }

        debug!(
            "damage type index: {}",
            bucket_counts(index.by_damage_type.iter().map(|(k, v)| (k.as_str(), v.len())))
        );
        debug!(
            "status index: {}",
            bucket_counts(index.by_status.iter().map(|(k, v)| (k.as_str(), v.len())))
        );
        index
    }

    /// Every indexed weapon, damage-type buckets first then status buckets,
    /// deduplicated by name (first occurrence kept).
    pub fn candidates(&self) -> Vec<&'a Weapon> {
        let mut seen = std::collections::HashSet::new();
        self.by_damage_type
            .values()
            .chain(self.by_status.values())
            .flatten()
            .copied()
            .filter(|weapon| seen.insert(weapon.name.as_str()))
            .collect()
    }

    pub fn summary(&self) -> WeaponIndexSummary {
        WeaponIndexSummary {
            damage_types: self.by_damage_type.keys().copied().collect(),
            status_effects: self.by_status.keys().copied().collect(),
            categories: self.by_category.keys().cloned().collect(),
        }
    }
}

fn bucket_counts<'k>(buckets: impl Iterator<Item = (&'k str, usize)>) -> String {
    buckets
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
