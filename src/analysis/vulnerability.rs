//! Boss vulnerability analysis from one row of the boss stat table.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::analysis::attributes::PhysicalDamage;
use crate::analysis::recommend::{recommend, PhysicalWeakness, RecommendationSet};
use crate::analysis::status::StatusEffect;
use crate::config::ScoringConfig;
use crate::data::table::RawRecord;
use crate::index::WeaponIndex;

const NEGATION_COLUMNS: [(PhysicalDamage, &str); 4] = [
    (PhysicalDamage::Standard, "neg_standard"),
    (PhysicalDamage::Slash, "neg_slash"),
    (PhysicalDamage::Strike, "neg_strike"),
    (PhysicalDamage::Pierce, "neg_pierce"),
];

const RESISTANCE_COLUMNS: [(StatusEffect, &str); 4] = [
    (StatusEffect::Hemorrhage, "res_hemorrhage"),
    (StatusEffect::Frostbite, "res_frostbite"),
    (StatusEffect::Poison, "res_poison"),
    (StatusEffect::ScarletRot, "res_scarlet_rot"),
];

const INFLICT_COLUMNS: [(&str, &str); 6] = [
    ("Bleed", "inflicts_bleed"),
    ("Frostbite", "inflicts_frostbite"),
    ("Scarlet Rot", "inflicts_scarlet_rot"),
    ("Poison", "inflicts_poison"),
    ("Madness", "inflicts_madness"),
    ("Sleep", "inflicts_sleep"),
];

const DAMAGE_COLUMNS: [(&str, &str); 8] = [
    ("Standard", "dmg_standard"),
    ("Slash", "dmg_slash"),
    ("Strike", "dmg_strike"),
    ("Pierce", "dmg_pierce"),
    ("Magic", "dmg_magic"),
    ("Fire", "dmg_fire"),
    ("Lightning", "dmg_lightning"),
    ("Holy", "dmg_holy"),
];

/// A value that may be absent from the source; absent serializes as `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrUnknown<T> {
    Known(T),
    Unknown,
}

impl<T> From<Option<T>> for OrUnknown<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => OrUnknown::Known(value),
            None => OrUnknown::Unknown,
        }
    }
}

impl<T: Serialize> Serialize for OrUnknown<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OrUnknown::Known(value) => value.serialize(serializer),
            OrUnknown::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

/// A status the boss can suffer, with its raw resistance text (`"252 / 302 / 402"`).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusVulnerability {
    pub status: StatusEffect,
    pub resistance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityProfile {
    pub weakest_physical: OrUnknown<PhysicalDamage>,
    pub physical_negation: IndexMap<PhysicalDamage, f64>,
    /// True when two or more negation values exist and all are equal, i.e. the
    /// weakest type was picked by column order alone.
    pub physical_negation_uniform: bool,
    /// Easiest to proc first.
    pub status_vulnerabilities: Vec<StatusEffect>,
    pub status_resistance_values: IndexMap<StatusEffect, String>,
    pub inflicts: Vec<&'static str>,
    pub dominant_damage: String,
    pub parryable: OrUnknown<bool>,
    /// 0 when absent.
    pub stance: f64,
    pub defense: f64,
    pub recommended_weapons: RecommendationSet,
}

impl VulnerabilityProfile {
    /// Profile for a boss with no stat row.
    pub fn unknown() -> Self {
        Self {
            weakest_physical: OrUnknown::Unknown,
            physical_negation: IndexMap::new(),
            physical_negation_uniform: false,
            status_vulnerabilities: Vec::new(),
            status_resistance_values: IndexMap::new(),
            inflicts: Vec::new(),
            dominant_damage: "Unknown".to_string(),
            parryable: OrUnknown::Unknown,
            stance: 0.0,
            defense: 0.0,
            recommended_weapons: RecommendationSet::new(),
        }
    }
}

pub fn analyze(
    stats: Option<&RawRecord>,
    index: &WeaponIndex<'_>,
    scoring: &ScoringConfig,
) -> VulnerabilityProfile {
    let Some(stats) = stats else {
        return VulnerabilityProfile::unknown();
    };

    let physical_negation: IndexMap<PhysicalDamage, f64> = NEGATION_COLUMNS
        .into_iter()
        .filter_map(|(kind, column)| stats.float(column).map(|value| (kind, value)))
        .collect();
    let weakness = physical_weakness(&physical_negation);

    let vulnerabilities = status_vulnerabilities(stats);
    let status_resistance_values = vulnerabilities
        .iter()
        .map(|vuln| (vuln.status, vuln.resistance.clone()))
        .collect();
    let ranked = rank_statuses(vulnerabilities);

    let inflicts = INFLICT_COLUMNS
        .into_iter()
        .filter(|(_, column)| stats.float(column) == Some(1.0))
        .map(|(name, _)| name)
        .collect();

    let active_damage: Vec<&str> = DAMAGE_COLUMNS
        .into_iter()
        .filter(|(_, column)| stats.float(column) == Some(1.0))
        .map(|(name, _)| name)
        .collect();
    let dominant_damage = if active_damage.is_empty() {
        "Unknown".to_string()
    } else {
        active_damage.join(", ")
    };

    let recommended_weapons = recommend(index, weakness, &ranked, scoring);

    VulnerabilityProfile {
        weakest_physical: weakness.map(|w| w.kind).into(),
        physical_negation_uniform: is_uniform(&physical_negation),
        physical_negation,
        status_vulnerabilities: ranked.iter().map(|vuln| vuln.status).collect(),
        status_resistance_values,
        inflicts,
        dominant_damage,
        parryable: stats.float("parryable").map(|value| value == 1.0).into(),
        stance: stats.float("stance").unwrap_or(0.0),
        defense: stats.float("defense").unwrap_or(0.0),
        recommended_weapons,
    }
}

/// Lowest negation (first in column order on ties). Meaningful when strictly
/// below the mean of the other present types; a lone type never is.
pub fn physical_weakness(negation: &IndexMap<PhysicalDamage, f64>) -> Option<PhysicalWeakness> {
    let mut weakest: Option<(PhysicalDamage, f64)> = None;
    for (kind, value) in negation {
        if weakest.map_or(true, |(_, lowest)| *value < lowest) {
            weakest = Some((*kind, *value));
        }
    }
    let (kind, lowest) = weakest?;

    let others: Vec<f64> = negation
        .iter()
        .filter(|(other, _)| **other != kind)
        .map(|(_, value)| *value)
        .collect();
    let meaningful = if others.is_empty() {
        false
    } else {
        lowest < others.iter().sum::<f64>() / others.len() as f64
    };
    Some(PhysicalWeakness { kind, meaningful })
}

fn is_uniform(negation: &IndexMap<PhysicalDamage, f64>) -> bool {
    let mut values = negation.values();
    match values.next() {
        Some(first) => negation.len() >= 2 && values.all(|value| value == first),
        None => false,
    }
}

/// Statuses with a present, non-immune resistance, in column order.
fn status_vulnerabilities(stats: &RawRecord) -> Vec<StatusVulnerability> {
    RESISTANCE_COLUMNS
        .into_iter()
        .filter_map(|(status, column)| {
            let resistance = stats.text_opt(column)?;
            if resistance.eq_ignore_ascii_case("immune") {
                return None;
            }
            Some(StatusVulnerability { status, resistance })
        })
        .collect()
}

/// Sort ascending by base resistance; unparseable values go last and ties keep order.
pub fn rank_statuses(mut vulnerabilities: Vec<StatusVulnerability>) -> Vec<StatusVulnerability> {
    vulnerabilities.sort_by(|a, b| {
        base_resistance(&a.resistance).total_cmp(&base_resistance(&b.resistance))
    });
    vulnerabilities
}

fn number_token() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid number pattern"))
}

/// First number in the first `/`-separated tier (`"1,092 / 1,348"` -> 1092.0);
/// infinity when there is none.
pub fn base_resistance(raw: &str) -> f64 {
    let first_tier = raw.split('/').next().unwrap_or_default();
    number_token()
        .find(first_tier)
        .and_then(|token| token.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Weapon;

    fn boss_stats() -> RawRecord {
        RawRecord::new()
            .with("boss", "Test Boss")
            .with("neg_standard", "10")
            .with("neg_slash", "10")
            .with("neg_strike", "20")
            .with("neg_pierce", "10")
            .with("res_hemorrhage", "40")
            .with("res_frostbite", "Immune")
            .with("res_poison", "100")
            .with("inflicts_frostbite", "1")
            .with("inflicts_poison", "0")
            .with("dmg_slash", "1")
            .with("dmg_fire", "1")
            .with("parryable", "1.0")
            .with("stance", "80")
    }

    #[test]
    fn weakest_physical_tie_goes_to_column_order() {
        let index = WeaponIndex::default();
        let profile = analyze(Some(&boss_stats()), &index, &ScoringConfig::default());
        assert_eq!(profile.weakest_physical, OrUnknown::Known(PhysicalDamage::Standard));
        assert!(!profile.physical_negation_uniform);
        assert_eq!(profile.physical_negation.len(), 4);
    }

    #[test]
    fn statuses_ranked_and_immune_excluded() {
        let index = WeaponIndex::default();
        let profile = analyze(Some(&boss_stats()), &index, &ScoringConfig::default());
        assert_eq!(
            profile.status_vulnerabilities,
            vec![StatusEffect::Hemorrhage, StatusEffect::Poison]
        );
        assert!(!profile.status_resistance_values.contains_key(&StatusEffect::Frostbite));
        assert_eq!(profile.inflicts, vec!["Frostbite"]);
        assert_eq!(profile.dominant_damage, "Slash, Fire");
        assert_eq!(profile.parryable, OrUnknown::Known(true));
        assert_eq!(profile.stance, 80.0);
        assert_eq!(profile.defense, 0.0);
    }

    #[test]
    fn blank_stance_on_parryable_boss_is_zero() {
        let stats = RawRecord::new()
            .with("neg_standard", "10")
            .with("parryable", "1")
            .with("stance", "");
        let profile = analyze(Some(&stats), &WeaponIndex::default(), &ScoringConfig::default());
        assert_eq!(profile.parryable, OrUnknown::Known(true));
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["stance"], 0.0);
        assert_eq!(json["defense"], 0.0);
        assert!(json["stance"].is_number());
    }

    #[test]
    fn ranking_is_by_first_tier_number() {
        let ranked = rank_statuses(vec![
            StatusVulnerability {
                status: StatusEffect::Hemorrhage,
                resistance: "1,092 / 1,348".to_string(),
            },
            StatusVulnerability {
                status: StatusEffect::Poison,
                resistance: "n/a phase".to_string(),
            },
            StatusVulnerability {
                status: StatusEffect::ScarletRot,
                resistance: "252 / 302 / 402".to_string(),
            },
        ]);
        let order: Vec<_> = ranked.iter().map(|v| v.status).collect();
        assert_eq!(
            order,
            vec![StatusEffect::ScarletRot, StatusEffect::Hemorrhage, StatusEffect::Poison]
        );
        assert_eq!(base_resistance("1,092 / 1,348"), 1092.0);
        assert!(base_resistance("Immune").is_infinite());
    }

    #[test]
    fn meaningful_weakness_against_mean_of_others() {
        let negation: IndexMap<_, _> = [
            (PhysicalDamage::Standard, 10.0),
            (PhysicalDamage::Slash, 0.0),
            (PhysicalDamage::Strike, 20.0),
        ]
        .into_iter()
        .collect();
        let weakness = physical_weakness(&negation).unwrap();
        assert_eq!(weakness.kind, PhysicalDamage::Slash);
        assert!(weakness.meaningful);

        let flat: IndexMap<_, _> = [(PhysicalDamage::Standard, 10.0), (PhysicalDamage::Pierce, 10.0)]
            .into_iter()
            .collect();
        let weakness = physical_weakness(&flat).unwrap();
        assert_eq!(weakness.kind, PhysicalDamage::Standard);
        assert!(!weakness.meaningful);
        assert!(is_uniform(&flat));

        let single: IndexMap<_, _> = [(PhysicalDamage::Strike, 5.0)].into_iter().collect();
        assert!(!physical_weakness(&single).unwrap().meaningful);
        assert!(!is_uniform(&single));
    }

    #[test]
    fn missing_stats_give_unknown_profile() {
        let weapons = vec![Weapon {
            passive_effect: "Blood loss".to_string(),
            primary_scaling: "Dex".to_string(),
            ..Weapon::named("Uchigatana")
        }];
        let index = WeaponIndex::build(&weapons);
        let profile = analyze(None, &index, &ScoringConfig::default());
        assert_eq!(profile, VulnerabilityProfile::unknown());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["parryable"], "Unknown");
        assert_eq!(json["stance"], 0.0);
        assert_eq!(json["weakest_physical"], "Unknown");
        assert!(json["recommended_weapons"].as_object().unwrap().is_empty());
    }

    #[test]
    fn profile_recommends_scored_weapons() {
        let weapons = vec![
            Weapon {
                damage_type: "Standard/Pierce".to_string(),
                passive_effect: "Causes blood loss buildup".to_string(),
                primary_scaling: "Dex".to_string(),
                ..Weapon::named("Reduvia")
            },
            Weapon {
                damage_type: "Strike".to_string(),
                primary_scaling: "Str".to_string(),
                ..Weapon::named("Club")
            },
        ];
        let index = WeaponIndex::build(&weapons);
        let profile = analyze(Some(&boss_stats()), &index, &ScoringConfig::default());
        let dex = &profile.recommended_weapons[&crate::analysis::recommend::BuildArchetype::Dexterity];
        assert_eq!(dex[0].name, "Reduvia");
        // Standard ties Slash and Pierce at 10 against Strike 20: mean of others is 13.3.
        assert_eq!(dex[0].score, 13);
        assert!(!profile
            .recommended_weapons
            .contains_key(&crate::analysis::recommend::BuildArchetype::Strength));
    }
}
