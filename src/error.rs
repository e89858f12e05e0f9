//! Error types for the generation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Failed to read data source {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data source {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Template error in {template}: {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
