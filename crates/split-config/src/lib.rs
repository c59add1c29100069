//! split-config
//!
//! Persistent preferences for rendering group ledgers: locale, currency,
//! precision and negative-amount style, plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
