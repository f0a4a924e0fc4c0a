//! Status effects and the ordered keyword table used to detect them in passive-effect text.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEffect {
    Hemorrhage,
    Frostbite,
    Poison,
    #[serde(rename = "Scarlet Rot")]
    ScarletRot,
    Madness,
    Sleep,
    #[serde(rename = "Death Blight")]
    DeathBlight,
}

/// First matching row wins; within a row any keyword matches. Keywords are lowercase.
pub const STATUS_KEYWORDS: [(StatusEffect, &[&str]); 7] = [
    (StatusEffect::Hemorrhage, &["blood loss", "hemorrhage", "bleed"]),
    (StatusEffect::Frostbite, &["frostbite", "frost"]),
    (StatusEffect::Poison, &["poison"]),
    (StatusEffect::ScarletRot, &["scarlet rot", "rot"]),
    (StatusEffect::Madness, &["madness"]),
    (StatusEffect::Sleep, &["sleep"]),
    (StatusEffect::DeathBlight, &["death", "blight"]),
];

/// Passive-effect texts that mean "no passive".
const NO_PASSIVE: [&str; 3] = ["", "none", "no passive effects"];

impl StatusEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hemorrhage => "Hemorrhage",
            Self::Frostbite => "Frostbite",
            Self::Poison => "Poison",
            Self::ScarletRot => "Scarlet Rot",
            Self::Madness => "Madness",
            Self::Sleep => "Sleep",
            Self::DeathBlight => "Death Blight",
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status a weapon's passive effect inflicts, if any.
pub fn detect_status(passive_effect: &str) -> Option<StatusEffect> {
    let passive = passive_effect.trim().to_lowercase();
    if NO_PASSIVE.contains(&passive.as_str()) {
        return None;
    }
    STATUS_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| passive.contains(keyword)))
        .map(|(status, _)| *status)
}
