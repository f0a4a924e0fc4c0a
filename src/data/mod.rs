//! Source loading: tables, cell coercion, structure literals, fuzzy lookup and lore.

pub mod cell;
pub mod inspect;
pub mod literal;
pub mod loader;
pub mod lookup;
pub mod lore;
pub mod table;

pub use cell::Cell;
pub use literal::Nested;
pub use loader::{load_all, load_source, LoadedSources, SourceKind};
pub use lookup::{normalize_name, FuzzyMap, FuzzyOptions, SimilarityMetric};
pub use lore::LoreLibrary;
pub use table::{RawRecord, RecordSet};
