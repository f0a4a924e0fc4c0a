//! Weapon enrichment: base rows from `weapons.csv`, scaling grades and base damage
//! from the separate weapon stat table, matched by fuzzy name.

use indexmap::IndexMap;
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::analysis::attributes::{grade_value, ScalingStat};
use crate::data::lookup::FuzzyMap;
use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::{keyed_lookup, EnrichContext};

/// Base-damage columns of the stat table, in output order.
const BASE_DAMAGE_COLUMNS: [&str; 5] = ["Phy", "Mag", "Fir", "Lit", "Hol"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub category: String,
    pub damage_type: String,
    pub requirements: Map<String, Value>,
    /// Stat code (`Str`, `Dex`, ...) -> grade letter; empty when no stat row matched.
    pub scaling: IndexMap<String, String>,
    /// Stat code of the best grade, or "None".
    pub primary_scaling: String,
    pub base_damage: IndexMap<String, String>,
    pub passive_effect: String,
    pub skill: String,
    pub fp_cost: String,
    pub weight: f64,
    pub dlc: u32,
}

impl Weapon {
    /// A weapon with every field at its default.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            lore: String::new(),
            category: "Unknown".to_string(),
            damage_type: "Standard".to_string(),
            requirements: Map::new(),
            scaling: IndexMap::new(),
            primary_scaling: "None".to_string(),
            base_damage: IndexMap::new(),
            passive_effect: "None".to_string(),
            skill: "None".to_string(),
            fp_cost: "0".to_string(),
            weight: 0.0,
            dlc: 0,
        }
    }

    pub fn primary_stat(&self) -> Option<ScalingStat> {
        ScalingStat::from_code(&self.primary_scaling)
    }

    /// Grade value for `stat`; 0 when unknown.
    pub fn grade(&self, stat: ScalingStat) -> u8 {
        self.scaling
            .get(stat.code())
            .map(|grade| grade_value(grade))
            .unwrap_or(0)
    }
}

/// Scaling and base damage for one stat-table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponStats {
    pub scaling: IndexMap<String, String>,
    pub base_damage: IndexMap<String, String>,
}

impl WeaponStats {
    fn from_row(row: &RawRecord) -> Self {
        let scaling = ScalingStat::ALL
            .into_iter()
            .map(|stat| (stat.code().to_string(), row.text(stat.code(), "-")))
            .collect();
        let base_damage = BASE_DAMAGE_COLUMNS
            .into_iter()
            .map(|column| (column.to_string(), row.text(column, "0")))
            .collect();
        Self {
            scaling,
            base_damage,
        }
    }
}

pub fn build_stats_lookup(weapon_stats: &RecordSet) -> FuzzyMap<WeaponStats> {
    keyed_lookup(weapon_stats, "Name", WeaponStats::from_row)
}

/// Highest grade in stat order Str, Dex, Int, Fai, Arc (the earliest stat wins ties);
/// `None` when every grade is 0.
pub fn primary_scaling(scaling: &IndexMap<String, String>) -> Option<ScalingStat> {
    let mut best: Option<(ScalingStat, u8)> = None;
    for stat in ScalingStat::ALL {
        let value = scaling.get(stat.code()).map(|g| grade_value(g)).unwrap_or(0);
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((stat, value));
        }
    }
    best.filter(|(_, value)| *value > 0).map(|(stat, _)| stat)
}

pub fn enrich_weapon(
    row: &RawRecord,
    stats: &FuzzyMap<WeaponStats>,
    ctx: &EnrichContext<'_>,
) -> Weapon {
    let name = row.text("name", "Unknown Weapon");
    let matched = stats.resolve(&name, &ctx.fuzzy).cloned().unwrap_or_default();
    let primary = primary_scaling(&matched.scaling)
        .map(|stat| stat.code().to_string())
        .unwrap_or_else(|| "None".to_string());

    Weapon {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        category: row.text("category", "Unknown"),
        damage_type: row.text("damage type", "Standard"),
        requirements: row.dict("requirements"),
        scaling: matched.scaling,
        primary_scaling: primary,
        base_damage: matched.base_damage,
        passive_effect: row.text("passive effect", "None"),
        skill: row.text("skill", "None"),
        fp_cost: row.text("FP cost", "0"),
        weight: row.float_or("weight", 0.0),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_weapons(
    weapons: &RecordSet,
    weapon_stats: &RecordSet,
    ctx: &EnrichContext<'_>,
) -> Vec<Weapon> {
    let stats = build_stats_lookup(weapon_stats);
    if !stats.is_empty() {
        info!("built scaling lookup: {} weapons", stats.len());
    }
    let enriched: Vec<Weapon> = weapons
        .iter()
        .map(|row| enrich_weapon(row, &stats, ctx))
        .collect();
    info!("enriched {} weapons", enriched.len());
    enriched
}
