use std::path::PathBuf;

use ephemeris::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

/// Validation key reported when `utc_datetime` is missing or unparseable
pub const INVALID_DATETIME_KEY: &str = "missing_or_invalid_datetime";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("validation failed: missing_or_invalid_datetime")]
    InvalidDatetime,

    #[error("Ephemeris data directory not found: {}", expected_path.display())]
    DataDirectoryMissing { expected_path: PathBuf },

    #[error("Ephemeris data files are missing or incomplete in {}", expected_path.display())]
    DataFilesIncomplete {
        expected_path: PathBuf,
        found_files_sample: Vec<String>,
    },

    #[error("Could not read ephemeris data directory {}: {source}", path.display())]
    DataDirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
