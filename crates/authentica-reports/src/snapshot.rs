//! # Render Snapshots
//!
//! Everything the presentation layer needs to draw the reports screen,
//! captured after each mutating session operation.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use authentica_core::ReportId;
use authentica_state::Report;

use crate::draft::WizardDraft;
use crate::filter::StatusFilter;
use crate::wizard::WizardStep;

/// Which half of the reports screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportView {
    /// The wizard.
    #[default]
    NewReport,
    /// The filtered list and detail panel.
    ReportList,
}

/// Where the submission flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Waiting on the gateway.
    Submitting,
    /// Filed; the confirmation shows until `until`.
    Succeeded {
        /// The new report.
        report_id: ReportId,
        /// End of the confirmation window.
        until: Instant,
    },
    /// The gateway failed; the draft is kept for a retry.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

impl SubmissionPhase {
    /// Whether the gateway is being awaited.
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Whether the success confirmation is showing at `now`.
    pub fn is_success_visible(&self, now: Instant) -> bool {
        matches!(self, Self::Succeeded { until, .. } if now < *until)
    }

    /// Failure reason, if the last submission failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// State of the reports screen at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Wizard step.
    pub current_step: WizardStep,
    /// Wizard draft.
    pub draft: WizardDraft,
    /// Whether the current step may be left.
    pub is_step_complete: bool,
    /// Reports passing the active filter, in insertion order.
    pub reports: Vec<Report>,
    /// Size of the unfiltered store.
    pub total_reports: usize,
    /// Report shown in the detail panel.
    pub selected_report: Option<Report>,
    /// Active list filter.
    pub filter: StatusFilter,
    /// Visible half of the screen.
    pub view: ReportView,
    /// A submission is in flight.
    pub is_submitting: bool,
    /// The success confirmation is showing.
    pub submission_success: bool,
    /// Reason the last submission failed, if it did.
    pub submission_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn success_window_closes() {
        let now = Instant::now();
        let phase = SubmissionPhase::Succeeded {
            report_id: ReportId(1),
            until: now + Duration::from_secs(3),
        };
        assert!(phase.is_success_visible(now));
        assert!(!phase.is_success_visible(now + Duration::from_secs(3)));
        assert!(!phase.is_submitting());
    }

    #[test]
    fn failure_reason_exposed() {
        let phase = SubmissionPhase::Failed {
            reason: "offline".to_string(),
        };
        assert_eq!(phase.failure(), Some("offline"));
        assert_eq!(SubmissionPhase::Idle.failure(), None);
    }
}
