//! Boss vulnerability analysis and weapon recommendation.

pub mod attributes;
pub mod recommend;
pub mod status;
pub mod vulnerability;

pub use attributes::{PhysicalDamage, ScalingStat};
pub use recommend::{BuildArchetype, Recommendation, RecommendationSet};
pub use status::StatusEffect;
pub use vulnerability::{analyze, OrUnknown, VulnerabilityProfile};
