use split_config::ConfigError;
use split_core::CoreError;
use split_domain::ParticipantKeyError;
use thiserror::Error;

/// Failures surfaced by the facade crate: persistence, preferences and
/// engine validation.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Invalid participant key: {0}")]
    InvalidKey(#[from] ParticipantKeyError),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;
