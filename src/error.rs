use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FuseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CSV {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("failed to open spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("spreadsheet {0} has no worksheets")]
    EmptyWorkbook(PathBuf),
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize output document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
