//! Physical damage types, scaling stats and scaling grades.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalDamage {
    Standard,
    Slash,
    Strike,
    Pierce,
}

impl PhysicalDamage {
    pub const ALL: [PhysicalDamage; 4] = [
        PhysicalDamage::Standard,
        PhysicalDamage::Slash,
        PhysicalDamage::Strike,
        PhysicalDamage::Pierce,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Slash => "Slash",
            Self::Strike => "Strike",
            Self::Pierce => "Pierce",
        }
    }

    /// Match one canonicalized token (`"Slash"`), not a raw damage-type string.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }

    /// Physical types named in a possibly `/`-delimited damage-type string
    /// such as `"Standard/Pierce"`. Unrecognized parts are dropped.
    pub fn parse_list(damage_type: &str) -> Vec<Self> {
        damage_type
            .split('/')
            .filter_map(|part| Self::from_token(&capitalize(part.trim())))
            .collect()
    }
}

impl fmt::Display for PhysicalDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Stat a weapon scales with; the serialized form is the source table's column code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalingStat {
    Str,
    Dex,
    Int,
    Fai,
    Arc,
}

impl ScalingStat {
    pub const ALL: [ScalingStat; 5] = [
        ScalingStat::Str,
        ScalingStat::Dex,
        ScalingStat::Int,
        ScalingStat::Fai,
        ScalingStat::Arc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Str => "Str",
            Self::Dex => "Dex",
            Self::Int => "Int",
            Self::Fai => "Fai",
            Self::Arc => "Arc",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.code() == code)
    }
}

/// Grade letter value: S=6, A=5, B=4, C=3, D=2, E=1; `-` and anything else are 0.
pub fn grade_value(grade: &str) -> u8 {
    match grade.trim() {
        "S" => 6,
        "A" => 5,
        "B" => 4,
        "C" => 3,
        "D" => 2,
        "E" => 1,
        _ => 0,
    }
}
