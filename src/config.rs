//! Run-scoped pipeline configuration. Every field has a default so an empty
//! (or absent) YAML file yields the stock pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::lookup::{FuzzyOptions, SimilarityMetric};
use crate::error::FuseError;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LORE_PATH: &str = "master_lore.json";
pub const DEFAULT_OUTPUT_PATH: &str = "elden_ring_enriched.json";
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub lore_path: PathBuf,
    pub output_path: PathBuf,
    pub fuzzy_cutoff: f64,
    pub similarity: SimilarityMetric,
    pub sources: SourceFiles,
    pub scoring: ScoringConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lore_path: PathBuf::from(DEFAULT_LORE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            similarity: SimilarityMetric::default(),
            sources: SourceFiles::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a YAML config. Relative `data_dir`, `lore_path` and `output_path`
    /// stay relative to the working directory, not the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FuseError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| FuseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| FuseError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Config rooted at `data_dir`, with lore and output files placed inside it.
    pub fn rooted_at(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            data_dir: data_dir.to_path_buf(),
            lore_path: data_dir.join(DEFAULT_LORE_PATH),
            output_path: data_dir.join(DEFAULT_OUTPUT_PATH),
            ..Self::default()
        }
    }

    pub fn fuzzy_options(&self) -> FuzzyOptions {
        FuzzyOptions {
            cutoff: self.fuzzy_cutoff,
            metric: self.similarity,
        }
    }

    pub fn source_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

/// File name of every tabular source, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub weapons: String,
    pub weapon_stats: String,
    pub boss_stats: String,
    pub bosses: String,
    pub armors: String,
    pub incantations: String,
    pub sorceries: String,
    pub npcs: String,
    pub locations: String,
    pub creatures: String,
    pub ashes_of_war: String,
    pub skills: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            weapons: "weapons.csv".to_string(),
            weapon_stats: "elden_ring_weapon.csv".to_string(),
            boss_stats: "elden_ring_boss_stats_clean.csv".to_string(),
            bosses: "bosses.csv".to_string(),
            armors: "armors.csv".to_string(),
            incantations: "incantations.csv".to_string(),
            sorceries: "sorceries.csv".to_string(),
            npcs: "npcs.csv".to_string(),
            locations: "locations.csv".to_string(),
            creatures: "creatures.csv".to_string(),
            ashes_of_war: "ashesOfWar.csv".to_string(),
            skills: "skills.csv".to_string(),
        }
    }
}

/// Weights used by the weapon recommendation scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight for the 1st, 2nd, ... ranked status vulnerability.
    pub status_tier_weights: Vec<u32>,
    /// Weight for every ranked status past the end of `status_tier_weights`.
    pub overflow_status_weight: u32,
    /// Physical bonus when the weakest type sits strictly below the others' average.
    pub meaningful_weakness_bonus: u32,
    /// Physical bonus when the weakest type is not meaningfully weaker.
    pub participation_bonus: u32,
    pub max_per_build: usize,
    /// How many top-scored weapons the per-build fallback scans.
    pub fallback_window: usize,
    /// Minimum grade value (D = 2) the fallback accepts in a build's stat.
    pub fallback_min_grade: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            status_tier_weights: vec![10, 7, 4, 2],
            overflow_status_weight: 1,
            meaningful_weakness_bonus: 3,
            participation_bonus: 1,
            max_per_build: 2,
            fallback_window: 10,
            fallback_min_grade: 2,
        }
    }
}

impl ScoringConfig {
    pub fn status_weight(&self, rank: usize) -> u32 {
        self.status_tier_weights
            .get(rank)
            .copied()
            .unwrap_or(self.overflow_status_weight)
    }
}
