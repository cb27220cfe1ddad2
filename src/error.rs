//! Error types

use crate::config::ValidationError;
use crate::generative::StepError;

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or contradictory configuration, raised before training starts
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// Config file could not be read, merged or deserialized
    #[error("Config error: {0}")]
    ConfigParse(String),

    /// Non-finite loss or gradient under the abort policy
    #[error("Numerical instability: {0}")]
    NumericalInstability(#[from] StepError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Unusable training data
    #[error("Data error: {0}")]
    Data(String),
}
