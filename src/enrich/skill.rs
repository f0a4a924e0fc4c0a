use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub lore: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub equipment: String,
    pub chargeable: String,
    pub fp_cost: String,
    pub effect: String,
    pub location: String,
    pub dlc: u32,
}

pub fn enrich_skill(row: &RawRecord, ctx: &EnrichContext<'_>) -> Skill {
    let name = row.text("name", "Unknown");
    Skill {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        kind: row.text("type", "Regular"),
        // Misspelled in the source export.
        equipment: row.text("equipament", "Unknown"),
        chargeable: row.text("charge", "No"),
        fp_cost: row.text("FP", "0"),
        effect: row.text("effect", ""),
        location: row.text("locations", "Unknown"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_skills(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<Skill> {
    let enriched: Vec<Skill> = rows.iter().map(|row| enrich_skill(row, ctx)).collect();
    info!("enriched {} skills", enriched.len());
    enriched
}
