//! Lore library: name -> description text, as produced by the lore extractor.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};

use crate::data::lookup::{FuzzyMap, FuzzyOptions};
use crate::error::FuseError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoreLibrary {
    entries: FuzzyMap<String>,
}

impl LoreLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = FuzzyMap::new();
        for (name, text) in pairs {
            entries.insert(name.as_ref(), text.into());
        }
        Self { entries }
    }

    /// Parse the extractor's JSON object. Non-string values are skipped.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: IndexMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        Ok(Self::from_pairs(parsed.into_iter().filter_map(|(name, value)| {
            value.as_str().map(|text| (name, text.to_string()))
        })))
    }

    pub fn load(path: &Path) -> Result<Self, FuseError> {
        let raw = fs::read_to_string(path).map_err(|source| FuseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| FuseError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load, degrading to an empty library when the file is absent or malformed.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            warn!("{} not found, proceeding without lore", path.display());
            return Self::new();
        }
        match Self::load(path) {
            Ok(library) => {
                info!("loaded lore library: {} entries", library.len());
                library
            }
            Err(err) => {
                warn!("{err}; proceeding without lore");
                Self::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lore text for `name`, or "" when nothing matches.
    pub fn lookup(&self, name: &str, options: &FuzzyOptions) -> String {
        self.entries
            .resolve(name, options)
            .cloned()
            .unwrap_or_default()
    }
}
