use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Npc {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub location: String,
    pub role: String,
    pub voiced_by: String,
    pub dlc: u32,
}

pub fn enrich_npc(row: &RawRecord, ctx: &EnrichContext<'_>) -> Npc {
    let name = row.text("name", "Unknown");
    Npc {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        location: row.text("location", "Unknown"),
        role: row.text("role", "Unknown"),
        voiced_by: row.text("voiced by", "Unknown"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_npcs(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<Npc> {
    let enriched: Vec<Npc> = rows.iter().map(|row| enrich_npc(row, ctx)).collect();
    info!("enriched {} npcs", enriched.len());
    enriched
}
