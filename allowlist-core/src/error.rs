//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use allowlist_client::ClientError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Bad host, port or domain format; no network call was made
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// "Add current domain" with no usable current page
    #[error("Could not determine the current domain")]
    NoCurrentDomain,

    /// Remove requested without a selection
    #[error("Select a domain from the list first")]
    NoDomainSelected,

    /// Server unreachable, timed out or answered non-2xx
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, server refusal), used for
    /// log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::NoCurrentDomain | Self::NoDomainSelected => true,
            Self::Client(e) => e.is_expected(),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }

    /// Log at the level `is_expected` asks for.
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
