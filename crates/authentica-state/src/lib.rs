//! # authentica-state — Lifecycle State Machines
//!
//! Closed enumerations with explicit transition tables. Status values are
//! never compared as strings; the display names (`"In Progress"`) exist only
//! at the serialization and presentation boundary.
//!
//! ## State Machines
//!
//! - **Report** (`report.rs`, `status.rs`): `Submitted → In Progress → Resolved`,
//!   with the `Submitted → Resolved` fast path. `Resolved` is terminal.
//!
//! - **Verification** (`verification.rs`): the outcome of a product check.
//!   Outcomes are values, not a lifecycle; they carry the presentation copy
//!   shown for each result.

pub mod report;
pub mod status;
pub mod verification;

// ─── Report re-exports ──────────────────────────────────────────────

pub use report::{PhotoHandle, Report, ReportDetails, ReportTransitionRecord, ISSUE_TYPES};
pub use status::{ReportStateError, ReportStatus};

// ─── Verification re-exports ────────────────────────────────────────

pub use verification::VerificationStatus;
