//! Name normalization and fuzzy resolution against normalized-key maps.
//! Used for lore, weapon stat rows, boss stat rows and CLI boss lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalize a name for lookup: lowercase, trimmed, whitespace runs collapsed to one space.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// String similarity used when no exact key matches. All metrics return a score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Ratcliff/Obershelp: `2 * matched / (len(a) + len(b))` over recursively found common blocks.
    #[default]
    Gestalt,
    Levenshtein,
    JaroWinkler,
    SorensenDice,
}

impl SimilarityMetric {
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Self::Gestalt => gestalt_ratio(a, b),
            Self::Levenshtein => strsim::normalized_levenshtein(a, b),
            Self::JaroWinkler => strsim::jaro_winkler(a, b),
            Self::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }
}

/// Matching settings for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    pub cutoff: f64,
    pub metric: SimilarityMetric,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            cutoff: crate::config::DEFAULT_FUZZY_CUTOFF,
            metric: SimilarityMetric::Gestalt,
        }
    }
}

/// Map keyed by normalized names, resolved exact-first then by best similarity.
/// Insertion order is kept; it breaks similarity ties (first key wins).
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for FuzzyMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> FuzzyMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the normalized form of `name`. A repeated key replaces the value in place.
    pub fn insert(&mut self, name: &str, value: V) {
        self.entries.insert(normalize_name(name), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get_exact(&self, name: &str) -> Option<&V> {
        self.entries.get(&normalize_name(name))
    }

    /// Resolve `name`; at most one value is ever returned.
    pub fn resolve(&self, name: &str, options: &FuzzyOptions) -> Option<&V> {
        self.resolve_entry(name, options).map(|(_, value)| value)
    }

    /// Like [FuzzyMap::resolve] but also returns the matched key.
    pub fn resolve_entry(&self, name: &str, options: &FuzzyOptions) -> Option<(&str, &V)> {
        let target = normalize_name(name);
        if let Some((key, value)) = self.entries.get_key_value(&target) {
            return Some((key.as_str(), value));
        }

        let mut best: Option<(f64, &String, &V)> = None;
        for (key, value) in &self.entries {
            let score = options.metric.score(key, &target);
            if best.map_or(true, |(best_score, _, _)| score > best_score) {
                best = Some((score, key, value));
            }
        }
        best.filter(|(score, _, _)| *score >= options.cutoff)
            .map(|(_, key, value)| (key.as_str(), value))
    }
}

impl<V> FromIterator<(String, V)> for FuzzyMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = FuzzyMap::new();
        for (name, value) in iter {
            map.insert(&name, value);
        }
        map
    }
}

/// Gestalt pattern matching ratio over chars.
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matched_chars(&a[..a_start], &b[..b_start])
        + matched_chars(&a[a_start + size..], &b[b_start + size..])
}

/// Longest common substring; earliest in `a`, then earliest in `b`, on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = previous[j] + 1;
                current[j + 1] = run;
                let start_a = i + 1 - run;
                if run > best.2 || (run == best.2 && start_a < best.0) {
                    best = (start_a, j + 1 - run, run);
                }
            }
        }
        previous = current;
    }
    best
}
