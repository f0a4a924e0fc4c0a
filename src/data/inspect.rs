//! Source overview for `lorefuse inspect`: row counts, per-column fill and a first-row sample.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data::loader::{LoadedSources, SourceKind};
use crate::data::table::RecordSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub source: &'static str,
    pub path: String,
    pub rows: usize,
    /// Column -> number of rows with a non-missing value, in header order.
    pub filled: IndexMap<String, usize>,
    pub sample: IndexMap<String, String>,
}

pub fn summarize(kind: SourceKind, table: &RecordSet, config: &PipelineConfig) -> SourceSummary {
    let filled: IndexMap<String, usize> = table
        .columns
        .iter()
        .map(|column| {
            let count = table
                .iter()
                .filter(|row| row.get(column).is_some_and(|cell| !cell.is_missing()))
                .count();
            (column.clone(), count)
        })
        .collect();
    let sample: IndexMap<String, String> = table
        .iter()
        .next()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|column| (column.clone(), row.text(column, "")))
                .collect()
        })
        .unwrap_or_default();

    SourceSummary {
        source: kind.as_str(),
        path: kind.path(config).display().to_string(),
        rows: table.len(),
        filled,
        sample,
    }
}

pub fn summarize_all(sources: &LoadedSources, config: &PipelineConfig) -> Vec<SourceSummary> {
    SourceKind::ALL
        .into_iter()
        .map(|kind| summarize(kind, sources.get(kind), config))
        .collect()
}

/// Plain-text rendering, one block per source.
pub fn render(summaries: &[SourceSummary], lore_entries: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "lore: {lore_entries} entries");
    for summary in summaries {
        let _ = writeln!(
            out,
            "{} ({}): {} rows x {} cols",
            summary.source,
            summary.path,
            summary.rows,
            summary.filled.len()
        );
        for (column, count) in &summary.filled {
            let sample = summary.sample.get(column).map(String::as_str).unwrap_or("");
            let _ = writeln!(out, "  {column}\t{count}/{}\t{}", summary.rows, truncate(sample, 60));
        }
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
