//! Sorceries and incantations share one shape; `type` records which table a row came from.

use indexmap::IndexMap;
use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

const REQUIREMENT_COLUMNS: [&str; 3] = ["INT", "FAI", "ARC"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellSchool {
    Sorceries,
    Incantations,
}

impl SpellSchool {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sorceries => "sorceries",
            Self::Incantations => "incantations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spell {
    pub name: String,
    #[serde(rename = "type")]
    pub school: SpellSchool,
    pub description: String,
    pub lore: String,
    pub effect: String,
    pub fp_cost: String,
    pub slot: u32,
    /// Only stats with a positive requirement.
    pub requirements: IndexMap<String, i64>,
    pub stamina_cost: String,
    pub bonus: String,
    /// Incantation group; empty for sorceries.
    pub group: String,
    pub location: String,
    pub dlc: u32,
}

fn requirements(row: &RawRecord) -> IndexMap<String, i64> {
    REQUIREMENT_COLUMNS
        .into_iter()
        .filter_map(|stat| {
            let value = row.float(stat)?;
            (value > 0.0).then(|| (stat.to_string(), value as i64))
        })
        .collect()
}

pub fn enrich_spell(row: &RawRecord, school: SpellSchool, ctx: &EnrichContext<'_>) -> Spell {
    let name = row.text("name", "Unknown");
    Spell {
        school,
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        effect: row.text("effect", ""),
        fp_cost: row.text("FP", "0"),
        slot: row.float("slot").filter(|slot| *slot >= 0.0).map_or(1, |slot| slot as u32),
        requirements: requirements(row),
        stamina_cost: row.text("stamina cost", "0"),
        bonus: row.text("bonus", "None"),
        group: row.text("group", ""),
        location: row.text("location", "Unknown"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_spells(rows: &RecordSet, school: SpellSchool, ctx: &EnrichContext<'_>) -> Vec<Spell> {
    let enriched: Vec<Spell> = rows
        .iter()
        .map(|row| enrich_spell(row, school, ctx))
        .collect();
    info!("enriched {} {}", enriched.len(), school.as_str());
    enriched
}
