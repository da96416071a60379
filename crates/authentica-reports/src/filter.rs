//! # Status Filter / Projection
//!
//! Read-only, status-scoped view over a slice of reports. Projection never
//! reorders: results come back in insertion order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use authentica_state::{Report, ReportStatus};

use crate::error::ReportError;

/// Which reports a list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    /// Every report.
    #[default]
    All,
    /// Only reports in this status.
    Only(ReportStatus),
}

impl StatusFilter {
    /// Canonical lowercase name (`all`, `submitted`, `in progress`, `resolved`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(ReportStatus::Submitted) => "submitted",
            Self::Only(ReportStatus::InProgress) => "in progress",
            Self::Only(ReportStatus::Resolved) => "resolved",
        }
    }

    /// Whether `report` passes this filter.
    pub fn matches(&self, report: &Report) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => report.status() == *status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ReportError;

    /// Parse a filter name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        ReportStatus::from_name(s)
            .map(Self::Only)
            .ok_or_else(|| ReportError::Validation(format!("unknown report filter: {s:?}")))
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ReportError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(f: StatusFilter) -> Self {
        f.as_str().to_string()
    }
}

/// Reports passing `filter`, in their original order.
pub fn filtered_reports(reports: &[Report], filter: StatusFilter) -> Vec<&Report> {
    reports.iter().filter(|r| filter.matches(r)).collect()
}
