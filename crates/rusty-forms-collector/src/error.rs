// File: src/error.rs
// Purpose: Errors raised outside the collection path (config, formatter lookup)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Unknown formatter '{0}' (expected 'vanilla' or 'jsonapi')")]
    UnknownFormatter(String),

    #[error("Invalid collector config: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}
