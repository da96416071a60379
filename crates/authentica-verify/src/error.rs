//! # Verification Errors

use thiserror::Error;

use authentica_core::AuthenticaError;

/// Errors arising from product verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// An OTP slot index past the last slot.
    #[error("OTP slot {index} does not exist ({len} slots)")]
    InvalidSlot {
        /// Requested slot.
        index: usize,
        /// Number of slots.
        len: usize,
    },

    /// The entered code cannot be checked.
    #[error("invalid code: {0}")]
    InvalidCode(String),
}

impl VerifyError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "INVALID_SLOT",
            Self::InvalidCode(_) => "INVALID_CODE",
        }
    }
}

impl From<VerifyError> for AuthenticaError {
    fn from(e: VerifyError) -> Self {
        Self::Validation(e.to_string())
    }
}
