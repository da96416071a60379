//! # Report Entity
//!
//! A report is a user complaint about a suspected counterfeit or
//! poor-quality product. Once created, only its status changes, and every
//! status change is appended to its transition log.

use serde::{Deserialize, Serialize};

use authentica_core::{PhotoId, ReportId, Timestamp};

use crate::status::{ReportStateError, ReportStatus};

/// Issue categories offered by the report form.
pub const ISSUE_TYPES: [&str; 5] = [
    "Counterfeit",
    "Expired",
    "Damaged",
    "Packaging Issue",
    "Quality Problem",
];

// ─── Attachments ─────────────────────────────────────────────────────

/// Opaque reference to a photo chosen in an external file picker.
///
/// The contents are never read; only the metadata the picker reports is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoHandle {
    /// Handle identifier.
    pub id: PhotoId,
    /// File name as reported by the picker.
    pub file_name: String,
    /// MIME type as reported by the picker.
    pub content_type: String,
    /// Size in bytes as reported by the picker.
    pub size_bytes: u64,
}

impl PhotoHandle {
    /// Create a handle with a fresh id.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: PhotoId::new(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }

    /// Whether the content type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

// ─── Details ─────────────────────────────────────────────────────────

/// The free-text fields of a report. All are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetails {
    /// Store where the product was bought.
    pub store_name: String,
    /// Store location.
    pub location: String,
    /// Issue category, usually one of [`ISSUE_TYPES`].
    pub issue_type: String,
    /// What is wrong with the product.
    pub description: String,
    /// Purchase date, receipt number, and similar.
    pub purchase_info: String,
}

impl ReportDetails {
    /// Names of required fields that are empty or whitespace-only,
    /// in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("store_name", &self.store_name),
            ("location", &self.location),
            ("issue_type", &self.issue_type),
            ("description", &self.description),
            ("purchase_info", &self.purchase_info),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 5
    }
}

// ─── Transition log ──────────────────────────────────────────────────

/// Record of a report status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTransitionRecord {
    /// State before the transition.
    pub from_state: ReportStatus,
    /// State after the transition.
    pub to_state: ReportStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
}

// ─── Report ──────────────────────────────────────────────────────────

/// A submitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique, immutable identifier.
    pub id: ReportId,
    /// Text fields captured by the form.
    #[serde(flatten)]
    pub details: ReportDetails,
    /// Attached photos in the order they were added.
    pub photos: Vec<PhotoHandle>,
    status: ReportStatus,
    /// Creation time.
    pub date: Timestamp,
    transitions: Vec<ReportTransitionRecord>,
}

impl Report {
    /// Create a report in the `Submitted` state.
    ///
    /// # Errors
    ///
    /// Returns [`ReportStateError::IncompleteDetails`] if any required field
    /// is empty.
    pub fn submitted(
        id: ReportId,
        details: ReportDetails,
        photos: Vec<PhotoHandle>,
        date: Timestamp,
    ) -> Result<Self, ReportStateError> {
        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(ReportStateError::IncompleteDetails {
                missing: missing.join(", "),
            });
        }
        Ok(Self {
            id,
            details,
            photos,
            status: ReportStatus::Submitted,
            date,
            transitions: Vec::new(),
        })
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Ordered log of status transitions.
    pub fn transitions(&self) -> &[ReportTransitionRecord] {
        &self.transitions
    }

    /// Creation date formatted for lists (`3/18/2025`).
    pub fn display_date(&self) -> String {
        self.date.to_display_date()
    }

    /// Whether the report is closed.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `target`.
    ///
    /// # Errors
    ///
    /// - [`ReportStateError::TerminalState`] if the report is resolved.
    /// - [`ReportStateError::InvalidTransition`] if `target` is not reachable
    ///   in one step from the current state.
    pub fn transition(&mut self, target: ReportStatus) -> Result<(), ReportStateError> {
        if self.status.is_terminal() {
            return Err(ReportStateError::TerminalState { state: self.status });
        }
        if !self.status.can_transition_to(target) {
            return Err(ReportStateError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.transitions.push(ReportTransitionRecord {
            from_state: self.status,
            to_state: target,
            timestamp: Timestamp::now(),
        });
        self.status = target;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ReportDetails {
        ReportDetails {
            store_name: "Shoprite".to_string(),
            location: "Sandton".to_string(),
            issue_type: "Counterfeit".to_string(),
            description: "Packaging tampered".to_string(),
            purchase_info: "Receipt #123".to_string(),
        }
    }

    fn make_report() -> Report {
        Report::submitted(ReportId(1), details(), Vec::new(), Timestamp::now()).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_new_report_is_submitted() {
        let report = make_report();
        assert_eq!(report.status(), ReportStatus::Submitted);
        assert!(report.transitions().is_empty());
        assert!(!report.is_terminal());
    }

    #[test]
    fn test_incomplete_details_rejected() {
        let mut d = details();
        d.location = "   ".to_string();
        d.purchase_info.clear();
        let err = Report::submitted(ReportId(1), d, Vec::new(), Timestamp::now()).unwrap_err();
        assert_eq!(
            err,
            ReportStateError::IncompleteDetails {
                missing: "location, purchase_info".to_string()
            }
        );
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        assert_eq!(
            ReportDetails::default().missing_fields(),
            vec!["store_name", "location", "issue_type", "description", "purchase_info"]
        );
        assert!(ReportDetails::default().is_empty());
        assert!(details().is_complete());
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn test_full_lifecycle() {
        let mut report = make_report();
        report.transition(ReportStatus::InProgress).unwrap();
        report.transition(ReportStatus::Resolved).unwrap();
        assert!(report.is_terminal());
        assert_eq!(report.transitions().len(), 2);
        assert_eq!(report.transitions()[0].from_state, ReportStatus::Submitted);
        assert_eq!(report.transitions()[1].to_state, ReportStatus::Resolved);
    }

    #[test]
    fn test_fast_path_resolution() {
        let mut report = make_report();
        report.transition(ReportStatus::Resolved).unwrap();
        assert_eq!(report.status(), ReportStatus::Resolved);
    }

    #[test]
    fn test_cannot_leave_resolved() {
        let mut report = make_report();
        report.transition(ReportStatus::Resolved).unwrap();
        let err = report.transition(ReportStatus::InProgress).unwrap_err();
        assert_eq!(
            err,
            ReportStateError::TerminalState {
                state: ReportStatus::Resolved
            }
        );
        assert_eq!(report.transitions().len(), 1);
    }

    #[test]
    fn test_cannot_move_backwards() {
        let mut report = make_report();
        report.transition(ReportStatus::InProgress).unwrap();
        let err = report.transition(ReportStatus::Submitted).unwrap_err();
        assert!(matches!(err, ReportStateError::InvalidTransition { .. }));
        assert_eq!(report.status(), ReportStatus::InProgress);
    }

    #[test]
    fn test_self_transition_rejected() {
        let mut report = make_report();
        assert!(report.transition(ReportStatus::Submitted).is_err());
    }

    #[test]
    fn test_transition_keeps_other_fields() {
        let mut report = make_report();
        let before = report.clone();
        report.transition(ReportStatus::InProgress).unwrap();
        assert_eq!(report.id, before.id);
        assert_eq!(report.details, before.details);
        assert_eq!(report.date, before.date);
    }

    // ── Attachments ──────────────────────────────────────────────────

    #[test]
    fn test_photo_handle_image_detection() {
        assert!(PhotoHandle::new("a.jpg", "image/jpeg", 10).is_image());
        assert!(PhotoHandle::new("a.PNG", "IMAGE/PNG", 10).is_image());
        assert!(!PhotoHandle::new("a.pdf", "application/pdf", 10).is_image());
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_report_serialization() {
        let mut report = make_report();
        report.transition(ReportStatus::InProgress).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["store_name"], "Shoprite");
        assert_eq!(json["status"], "In Progress");
        let parsed: Report = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, report);
    }
}
