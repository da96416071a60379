//! # Domain Identity Newtypes
//!
//! Newtype wrappers for identifiers. Report and scan ids are time-derived
//! (milliseconds since the Unix epoch) and allocated through [`IdAllocator`],
//! which guarantees strict monotonicity within a process. Photo handles use
//! random UUIDs since they come from an external file picker.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submitted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u64);

/// Unique identifier for a product verification scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(pub u64);

/// Opaque identifier for a photo attachment handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub Uuid);

impl ReportId {
    /// Access the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl ScanId {
    /// Access the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl PhotoId {
    /// Generate a new random photo identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "report:{}", self.0)
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scan:{}", self.0)
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "photo:{}", self.0)
    }
}

// ─── Allocation ──────────────────────────────────────────────────────

/// Allocator for time-derived identifiers.
///
/// Each call returns `max(now_millis, last + 1)`, so values track wall-clock
/// time while staying strictly increasing when two calls land in the same
/// millisecond or the clock steps backwards. The compare-exchange loop makes
/// allocation safe from any number of threads.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator with no prior allocations.
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Allocate the next raw value.
    pub fn next_raw(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => last = observed,
            }
        }
    }

    /// Allocate a report identifier.
    pub fn next_report_id(&self) -> ReportId {
        ReportId(self.next_raw())
    }

    /// Allocate a scan identifier.
    pub fn next_scan_id(&self) -> ScanId {
        ScanId(self.next_raw())
    }
}
