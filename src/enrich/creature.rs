use log::info;
use serde::Serialize;

use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::EnrichContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Creature {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub locations: Vec<String>,
    pub drops: Vec<String>,
    pub dlc: u32,
}

pub fn enrich_creature(row: &RawRecord, ctx: &EnrichContext<'_>) -> Creature {
    let name = row.text("name", "Unknown");
    Creature {
        description: row.text("blockquote", ""),
        lore: ctx.lore_for(&name),
        locations: row.list("locations"),
        drops: row.list("drops"),
        dlc: row.flag("dlc"),
        name,
    }
}

pub fn enrich_creatures(rows: &RecordSet, ctx: &EnrichContext<'_>) -> Vec<Creature> {
    let enriched: Vec<Creature> = rows.iter().map(|row| enrich_creature(row, ctx)).collect();
    info!("enriched {} creatures", enriched.len());
    enriched
}
