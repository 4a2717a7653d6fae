//! Configuration errors

use std::path::PathBuf;

/// Errors raised while loading or validating a [`GameConfig`](super::GameConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for this schema
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed but breaks a gameplay constraint
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
