use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AshOfWar {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub affinity: String,
    pub skill: String,
    pub dlc: u32,
}

pub fn enrich_ash_of_war(row: &RawRecord, ctx: &EnrichContext<'_>) -> AshOfWar {
    let name = row.text("name", "Unknown");
    AshOfWar {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        affinity: row.text("affinity", "Standard"),
        skill: row.text("skill", "Unknown"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_ashes_of_war(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<AshOfWar> {
    let enriched: Vec<AshOfWar> = rows.iter().map(|row| enrich_ash_of_war(row, ctx)).collect();
    info!("enriched {} ashes of war", enriched.len());
    enriched
}
