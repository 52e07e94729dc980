//! Error types for Landsraad

use thiserror::Error;

/// Failure while loading configuration or seed files
#[derive(Debug, Error)]
pub enum LandsraadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LandsraadError>;
