use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Armor {
    pub name: String,
    pub description: String,
    pub lore: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Source dict as-is (`{'Phy': 3.6, ...}`); `{}` when it does not decode to one.
    pub damage_negation: Map<String, Value>,
    pub resistance: Map<String, Value>,
    pub weight: f64,
    pub special_effect: String,
    pub how_to_acquire: String,
    pub dlc: u32,
}

pub fn enrich_armor(row: &RawRecord, ctx: &EnrichContext<'_>) -> Armor {
    let name = row.text("name", "Unknown");
    Armor {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        kind: row.text("type", "Unknown"),
        damage_negation: row.first_dict("damage negation"),
        resistance: row.first_dict("resistance"),
        weight: row.float_or("weight", 0.0),
        special_effect: row.text("special effect", "None"),
        how_to_acquire: row.text("how to acquire", "Unknown"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_armors(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<Armor> {
    let enriched: Vec<Armor> = rows.iter().map(|row| enrich_armor(row, ctx)).collect();
    info!("enriched {} armors", enriched.len());
    enriched
}
