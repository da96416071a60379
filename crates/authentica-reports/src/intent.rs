//! # Navigation Intents
//!
//! Requests the session makes of the routing shell. The session never
//! navigates itself; the shell drains intents and decides what to show.

use serde::{Deserialize, Serialize};

use authentica_core::ReportId;

/// A navigation request for the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "report_id", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Show the detail panel for a report.
    ShowReportDetail(ReportId),
    /// Show the report list.
    ShowReportList,
    /// Show the new-report form.
    ShowNewReportForm,
    /// A report was filed; show the confirmation.
    ReportSubmitted(ReportId),
}
