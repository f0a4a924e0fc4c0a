use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub region: String,
    pub items: Vec<String>,
    pub npcs: Vec<String>,
    pub creatures: Vec<String>,
    pub bosses: Vec<String>,
    pub dlc: u32,
}

pub fn enrich_location(row: &RawRecord, ctx: &EnrichContext<'_>) -> Location {
    let name = row.text("name", "Unknown");
    Location {
        description: row.text("description", ""),
        lore: ctx.lore_for(&name),
        region: row.text("region", "Unknown"),
        items: row.list("items"),
        npcs: row.list("npcs"),
        creatures: row.list("creatures"),
        bosses: row.list("bosses"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_locations(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<Location> {
    let enriched: Vec<Location> = rows.iter().map(|row| enrich_location(row, ctx)).collect();
    info!("enriched {} locations", enriched.len());
    enriched
}
