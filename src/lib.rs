pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod enrich;
pub mod error;
pub mod index;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::FuseError;
pub use pipeline::{fuse, run, EnrichedDocument};
