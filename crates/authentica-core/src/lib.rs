//! # authentica-core — Foundational Types for Authentica
//!
//! Leaf crate of the workspace. Defines the primitives every other crate
//! builds on: identifier newtypes, UTC timestamps, the error hierarchy, and
//! the runtime configuration loaded from the environment.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `ReportId`, `ScanId` and `PhotoId` are distinct
//!    types. A scan id cannot be passed where a report id is expected.
//!
//! 2. **Time-derived, strictly increasing ids.** [`IdAllocator`] hands out
//!    millisecond-epoch values that never repeat within a process, even
//!    under concurrent callers.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] is UTC with seconds precision;
//!    locale-style display dates are derived from it, never stored.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `authentica-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod identity;
pub mod temporal;

pub use config::{AppConfig, ConfigError};
pub use error::AuthenticaError;
pub use identity::{IdAllocator, PhotoId, ReportId, ScanId};
pub use temporal::Timestamp;
