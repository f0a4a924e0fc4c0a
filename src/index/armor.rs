use indexmap::IndexMap;
use log::info;

use crate::enrich::Armor;

/// Armors grouped by `type`, types in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ArmorIndex<'a> {
    pub by_type: IndexMap<&'a str, Vec<&'a Armor>>,
}

impl<'a> ArmorIndex<'a> {
    pub fn build(armors: &'a [Armor]) -> Self {
        let mut by_type: IndexMap<&'a str, Vec<&'a Armor>> = IndexMap::new();
        for armor in armors {
            by_type.entry(armor.kind.as_str()).or_default().push(armor);
        }
        info!(
            "armor types: {}",
            by_type
                .iter()
                .map(|(kind, armors)| format!("{kind}: {}", armors.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { by_type }
    }

    pub fn types(&self) -> Vec<String> {
        self.by_type.keys().map(|kind| kind.to_string()).collect()
    }
}
