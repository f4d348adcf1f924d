use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("solar computation failed for location '{location}': {source}")]
    OracleFailure {
        location: String,
        #[source]
        source: OracleError,
    },

    #[error("failed to write {}: {source}", path.display())]
    ExportFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to load run configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Failures raised by an astronomical oracle implementation.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("solar position: {0}")]
    Position(#[from] solar_positioning::Error),

    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Other(String),
}
