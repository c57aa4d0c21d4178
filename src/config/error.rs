//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or validating iframe.toml.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid iframe.toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Message names the offending key, e.g. `[iframe.slug] ...`.
    #[error("invalid config: {0}")]
    Validation(String),
}
