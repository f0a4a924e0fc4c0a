//! Weapon recommendations against one boss profile.
//!
//! Every indexed weapon is scored from two signals: the status it inflicts (weighted
//! by how easy the boss is to proc, see [rank_statuses](crate::analysis::vulnerability::rank_statuses))
//! and whether it deals the boss's weakest physical type. Scored weapons are then
//! distributed across build archetypes by primary scaling.

use indexmap::IndexMap;
use serde::Serialize;

use crate::analysis::attributes::{PhysicalDamage, ScalingStat};
use crate::analysis::status::{detect_status, StatusEffect};
use crate::analysis::vulnerability::StatusVulnerability;
use crate::config::ScoringConfig;
use crate::enrich::Weapon;
use crate::index::WeaponIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildArchetype {
    Strength,
    Dexterity,
    Intelligence,
    Faith,
    Arcane,
}

impl BuildArchetype {
    /// Distribution order.
    pub const ALL: [BuildArchetype; 5] = [
        BuildArchetype::Strength,
        BuildArchetype::Dexterity,
        BuildArchetype::Intelligence,
        BuildArchetype::Faith,
        BuildArchetype::Arcane,
    ];

    pub fn stat(self) -> ScalingStat {
        match self {
            Self::Strength => ScalingStat::Str,
            Self::Dexterity => ScalingStat::Dex,
            Self::Intelligence => ScalingStat::Int,
            Self::Faith => ScalingStat::Fai,
            Self::Arcane => ScalingStat::Arc,
        }
    }

    pub fn for_stat(stat: ScalingStat) -> Self {
        match stat {
            ScalingStat::Str => Self::Strength,
            ScalingStat::Dex => Self::Dexterity,
            ScalingStat::Int => Self::Intelligence,
            ScalingStat::Fai => Self::Faith,
            ScalingStat::Arc => Self::Arcane,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Intelligence => "intelligence",
            Self::Faith => "faith",
            Self::Arcane => "arcane",
        }
    }
}

/// The boss's weakest physical type and whether it is meaningfully weaker than the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalWeakness {
    pub kind: PhysicalDamage,
    pub meaningful: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub category: String,
    pub damage_type: String,
    pub passive_effect: String,
    pub score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWeapon<'a> {
    pub weapon: &'a Weapon,
    pub score: u32,
    pub reason: String,
}

impl ScoredWeapon<'_> {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            name: self.weapon.name.clone(),
            category: self.weapon.category.clone(),
            damage_type: self.weapon.damage_type.clone(),
            passive_effect: self.weapon.passive_effect.clone(),
            score: self.score,
            reason: self.reason.clone(),
        }
    }
}

pub type RecommendationSet = IndexMap<BuildArchetype, Vec<Recommendation>>;

/// Score one weapon; `None` when nothing about it fits the boss.
pub fn score_weapon<'a>(
    weapon: &'a Weapon,
    weakness: Option<PhysicalWeakness>,
    status_weights: &IndexMap<StatusEffect, (u32, &str)>,
    scoring: &ScoringConfig,
) -> Option<ScoredWeapon<'a>> {
    let mut score = 0;
    let mut reasons = Vec::new();

    if let Some(weakness) = weakness {
        if PhysicalDamage::parse_list(&weapon.damage_type).contains(&weakness.kind) {
            if weakness.meaningful {
                score += scoring.meaningful_weakness_bonus;
                reasons.push(format!("Exploits {} weakness", weakness.kind));
            } else {
                score += scoring.participation_bonus;
            }
        }
    }

    if let Some(status) = detect_status(&weapon.passive_effect) {
        if let Some((weight, resistance)) = status_weights.get(&status) {
            score += weight;
            reasons.push(format!("Applies {status} (boss resistance: {resistance})"));
        }
    }

    if score == 0 {
        return None;
    }
    let reason = if reasons.is_empty() {
        format!("Deals {} damage", weapon.damage_type)
    } else {
        reasons.join("; ")
    };
    Some(ScoredWeapon {
        weapon,
        score,
        reason,
    })
}

/// Score every candidate, drop zero scores, and sort by score descending.
/// The sort is stable, so equal scores keep candidate order.
pub fn score_weapons<'a>(
    candidates: &[&'a Weapon],
    weakness: Option<PhysicalWeakness>,
    ranked: &[StatusVulnerability],
    scoring: &ScoringConfig,
) -> Vec<ScoredWeapon<'a>> {
    let status_weights: IndexMap<StatusEffect, (u32, &str)> = ranked
        .iter()
        .enumerate()
        .map(|(rank, vuln)| {
            (
                vuln.status,
                (scoring.status_weight(rank), vuln.resistance.as_str()),
            )
        })
        .collect();

    let mut scored: Vec<ScoredWeapon<'a>> = candidates
        .iter()
        .copied()
        .filter_map(|weapon| score_weapon(weapon, weakness, &status_weights, scoring))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Spread scored weapons across archetypes by primary scaling. An archetype
/// left empty falls back to the top-scored weapons with a usable grade in its
/// stat. Archetypes that stay empty are omitted.
pub fn distribute(scored: &[ScoredWeapon<'_>], scoring: &ScoringConfig) -> RecommendationSet {
    let mut builds: IndexMap<BuildArchetype, Vec<Recommendation>> = BuildArchetype::ALL
        .into_iter()
        .map(|build| (build, Vec::new()))
        .collect();

    for entry in scored {
        let Some(stat) = entry.weapon.primary_stat() else {
            continue;
        };
        let slot = builds.entry(BuildArchetype::for_stat(stat)).or_default();
        if slot.len() < scoring.max_per_build {
            slot.push(entry.to_recommendation());
        }
    }

    for (build, slot) in builds.iter_mut() {
        if !slot.is_empty() {
            continue;
        }
        for entry in scored.iter().take(scoring.fallback_window) {
            if slot.len() >= scoring.max_per_build {
                break;
            }
            if entry.weapon.grade(build.stat()) >= scoring.fallback_min_grade {
                slot.push(entry.to_recommendation());
            }
        }
    }

    builds.retain(|_, slot| !slot.is_empty());
    builds
}

pub fn recommend(
    index: &WeaponIndex<'_>,
    weakness: Option<PhysicalWeakness>,
    ranked: &[StatusVulnerability],
    scoring: &ScoringConfig,
) -> RecommendationSet {
    let candidates = index.candidates();
    let scored = score_weapons(&candidates, weakness, ranked, scoring);
    distribute(&scored, scoring)
}
