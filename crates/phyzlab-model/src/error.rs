//! Error types for phyzlab-model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Non-finite value for control {key}: {value}")]
    NonFiniteValue { key: String, value: f64 },

    #[error("Invalid control {key}: {reason}")]
    InvalidControl { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
