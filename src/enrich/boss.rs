//! Boss enrichment: locations and drops from the nested `Locations & Drops`
//! column, plus the vulnerability profile from the fuzzily-matched stat row.

use std::sync::OnceLock;

use log::info;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::vulnerability::{analyze, VulnerabilityProfile};
use crate::data::cell::value_to_text;
use crate::data::literal::Nested;
use crate::data::lookup::FuzzyMap;
use crate::data::table::{RawRecord, RecordSet};
use crate::enrich::{keyed_lookup, EnrichContext};
use crate::index::WeaponIndex;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boss {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub hp: String,
    pub locations: Vec<String>,
    pub drops: Vec<String>,
    pub dlc: u32,
    #[serde(flatten)]
    pub vulnerability: VulnerabilityProfile,
}

fn rune_amount() -> &'static Regex {
    static RUNES: OnceLock<Regex> = OnceLock::new();
    RUNES.get_or_init(|| Regex::new(r"^[\d,]+$").expect("valid rune pattern"))
}

/// Split a decoded `{location: [items...]}` dict into location names and drops.
/// Pure rune amounts (`"120,000"`) are not drops.
pub fn split_locations_and_drops(nested: &Nested) -> (Vec<String>, Vec<String>) {
    let mut locations = Vec::new();
    let mut drops = Vec::new();
    let Nested::Value(Value::Object(map)) = nested else {
        return (locations, drops);
    };
    for (location, items) in map {
        locations.push(location.trim_end().trim_end_matches(':').trim().to_string());
        let Value::Array(items) = items else {
            continue;
        };
        for item in items {
            let item = value_to_text(item).trim().to_string();
            if !rune_amount().is_match(&item) {
                drops.push(item);
            }
        }
    }
    (locations, drops)
}

pub fn build_stats_lookup(boss_stats: &RecordSet) -> FuzzyMap<RawRecord> {
    keyed_lookup(boss_stats, "boss", RawRecord::clone)
}

pub fn enrich_boss(
    row: &RawRecord,
    stats: &FuzzyMap<RawRecord>,
    index: &WeaponIndex<'_>,
    ctx: &EnrichContext<'_>,
) -> Boss {
    let name = row.text("name", "Unknown Boss");
    let (locations, drops) = split_locations_and_drops(&row.nested("Locations & Drops"));
    let vulnerability = analyze(stats.resolve(&name, &ctx.fuzzy), index, ctx.scoring);
    let lore = ctx.lore_for(&name);
    let blockquote = row.text("blockquote", "");

    Boss {
        description: if blockquote.is_empty() { lore.clone() } else { blockquote },
        lore,
        hp: row.text("HP", "Unknown"),
        locations,
        drops,
        dlc: row.flag("dlc"),
        vulnerability,
        name,
    }
}

/// Takes the finished weapon index: recommendations need every weapon enriched first.
pub fn enrich_bosses(
    bosses: &RecordSet,
    boss_stats: &RecordSet,
    index: &WeaponIndex<'_>,
    ctx: &EnrichContext<'_>,
) -> Vec<Boss> {
    let stats = build_stats_lookup(boss_stats);
    if !stats.is_empty() {
        info!("built boss stats lookup: {} entries", stats.len());
    }
    let enriched: Vec<Boss> = bosses
        .iter()
        .map(|row| enrich_boss(row, &stats, index, ctx))
        .collect();
    info!("enriched {} bosses", enriched.len());
    enriched
}
