//! Cross-reference indexes built over enriched entities.

pub mod armor;
pub mod location;
pub mod weapon;

pub use armor::ArmorIndex;
pub use location::LocationIndex;
pub use weapon::{WeaponIndex, WeaponIndexSummary};
