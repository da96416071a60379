//! # Error Types — Structured Error Hierarchy
//!
//! Top-level error type shared across the Authentica crates. Domain crates
//! define their own narrower enums and convert into [`AuthenticaError`] at
//! crate boundaries where a single error type is convenient.
//!
//! ## Design
//!
//! - Configuration errors name the offending variable and value.
//! - Transition errors include the current state and the attempted target.
//! - Nothing here is fatal to the process; every variant is recoverable.

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for Authentica.
#[derive(Error, Debug)]
pub enum AuthenticaError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A lifecycle transition was rejected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AuthenticaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts() {
        let err: AuthenticaError = ConfigError::InvalidValue {
            var: "AUTHENTICA_SUBMIT_LATENCY_MS".to_string(),
            value: "soon".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("configuration error"));
        assert!(err.to_string().contains("AUTHENTICA_SUBMIT_LATENCY_MS"));
    }

    #[test]
    fn serde_error_converts() {
        let bad = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: AuthenticaError = bad.into();
        assert!(matches!(err, AuthenticaError::Serialization(_)));
    }
}
