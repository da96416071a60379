//! # Report Error Types
//!
//! Every failure of the report workflow is local and recoverable. Variants
//! carry the context the presentation layer needs to explain the failure:
//! the missing fields, the attempted transition, the out-of-range index.

use std::time::Duration;

use thiserror::Error;

use authentica_core::{AuthenticaError, ReportId};
use authentica_state::ReportStatus;

/// Errors arising from report workflow operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Input is incomplete or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested status change is not in the transition table.
    #[error("invalid report transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: ReportStatus,
        /// Attempted target status.
        to: ReportStatus,
    },

    /// Index-based mutation addressed a slot that does not exist.
    #[error("index {index} out of range for {len} item(s)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// No report with this id exists in the store.
    #[error("report not found: {0}")]
    NotFound(ReportId),

    /// An operation needs a selected report and none is selected.
    #[error("no report is selected")]
    NothingSelected,

    /// A report with this id is already stored.
    #[error("duplicate report id: {0}")]
    DuplicateId(ReportId),

    /// A submission is already running.
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// `finish_submission` was called with nothing in flight.
    #[error("no submission is pending")]
    NoSubmissionPending,

    /// A submission was requested outside a tokio runtime.
    #[error("no async runtime is available to run the submission")]
    NoRuntime,

    /// The submission gateway rejected or failed the request.
    #[error("submission failed: {0}")]
    Gateway(String),

    /// The submission gateway did not answer in time.
    #[error("submission timed out after {0:?}")]
    Timeout(Duration),
}

impl ReportError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NothingSelected => "NOTHING_SELECTED",
            Self::DuplicateId(_) => "DUPLICATE_ID",
            Self::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            Self::NoSubmissionPending => "NO_SUBMISSION_PENDING",
            Self::NoRuntime => "NO_RUNTIME",
            Self::Gateway(_) => "GATEWAY",
            Self::Timeout(_) => "TIMEOUT",
        }
    }
}

impl From<ReportError> for AuthenticaError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::InvalidTransition { .. } => Self::InvalidTransition(e.to_string()),
            ReportError::NotFound(_) | ReportError::NothingSelected => {
                Self::NotFound(e.to_string())
            }
            other => Self::Validation(other.to_string()),
        }
    }
}
