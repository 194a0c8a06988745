//! Error types for the cheat-sheet stack binary.

use construct_framework::ConstructError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration, assembling the stack,
/// or writing the manifest.
#[derive(Debug, Error)]
pub enum AppError {
    /// The stack declared something the framework rejected.
    #[error("Assembly failed: {0}")]
    Construct(#[from] ConstructError),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Failed to write manifest to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
