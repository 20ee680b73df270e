//! Error types for record store operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors while persisting or mutating kill records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create temporary file in {path}")]
    CreateTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write records to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace record file {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("failed to serialize records")]
    Serialize(#[source] serde_json::Error),

    #[error("unknown boss '{name}'")]
    UnknownBoss { name: String },
}
