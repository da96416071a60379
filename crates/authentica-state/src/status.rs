//! # Report Status Lifecycle
//!
//! ```text
//! Submitted ──▶ In Progress ──▶ Resolved (terminal)
//!     │                            ▲
//!     └────────────────────────────┘
//! ```
//!
//! Transitions only move forward. The direct `Submitted → Resolved` edge is
//! kept as a fast-path resolution.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The lifecycle state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Filed by the user, not yet picked up.
    #[serde(rename = "Submitted")]
    Submitted,
    /// Under investigation.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Closed (terminal).
    #[serde(rename = "Resolved")]
    Resolved,
}

impl ReportStatus {
    /// Every status in lifecycle order.
    pub const ALL: [ReportStatus; 3] = [Self::Submitted, Self::InProgress, Self::Resolved];

    /// The display name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }

    /// Resolve a status name, ignoring case.
    ///
    /// `In Progress` is also accepted without the space and with `_` or `-`
    /// as separator. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "submitted" => Some(Self::Submitted),
            "inprogress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Return the set of valid target states from this state.
    pub fn valid_transitions(&self) -> &'static [ReportStatus] {
        match self {
            Self::Submitted => &[Self::InProgress, Self::Resolved],
            Self::InProgress => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }

    /// Whether `target` is reachable from this state in one step.
    pub fn can_transition_to(&self, target: ReportStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Position in the lifecycle, starting at 0.
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Submitted => 0,
            Self::InProgress => 1,
            Self::Resolved => 2,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ReportStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ReportStateError::UnknownStatus {
            name: s.to_string(),
        })
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by the report lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportStateError {
    /// Attempted transition is not in the transition table.
    #[error("invalid report transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: ReportStatus,
        /// Attempted target state.
        to: ReportStatus,
    },

    /// Report is in a terminal state.
    #[error("report is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: ReportStatus,
    },

    /// A report was built with required fields left empty.
    #[error("report is missing required fields: {missing}")]
    IncompleteDetails {
        /// Comma-separated field names.
        missing: String,
    },

    /// A status name did not match any known status.
    #[error("unknown report status: {name:?}")]
    UnknownStatus {
        /// The rejected name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn transition_table() {
        use ReportStatus::*;
        assert_eq!(Submitted.valid_transitions(), &[InProgress, Resolved]);
        assert_eq!(InProgress.valid_transitions(), &[Resolved]);
        assert!(Resolved.valid_transitions().is_empty());
    }

    #[test]
    fn only_resolved_is_terminal() {
        assert!(!ReportStatus::Submitted.is_terminal());
        assert!(!ReportStatus::InProgress.is_terminal());
        assert!(ReportStatus::Resolved.is_terminal());
    }

    #[test]
    fn names_round_trip() {
        for status in ReportStatus::ALL {
            assert_eq!(ReportStatus::from_name(status.as_str()), Some(status));
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(ReportStatus::from_name("SUBMITTED"), Some(ReportStatus::Submitted));
        assert_eq!(ReportStatus::from_name("in progress"), Some(ReportStatus::InProgress));
        assert_eq!(ReportStatus::from_name("In_Progress"), Some(ReportStatus::InProgress));
        assert_eq!(ReportStatus::from_name("inprogress"), Some(ReportStatus::InProgress));
        assert_eq!(ReportStatus::from_name(" resolved "), Some(ReportStatus::Resolved));
        assert_eq!(ReportStatus::from_name("closed"), None);
        assert_eq!(ReportStatus::from_name(""), None);
    }

    #[test]
    fn from_str_reports_unknown_names() {
        let err = "archived".parse::<ReportStatus>().unwrap_err();
        assert_eq!(
            err,
            ReportStateError::UnknownStatus {
                name: "archived".to_string()
            }
        );
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: ReportStatus = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(parsed, ReportStatus::Resolved);
    }

    fn any_status() -> impl Strategy<Value = ReportStatus> {
        prop_oneof![
            Just(ReportStatus::Submitted),
            Just(ReportStatus::InProgress),
            Just(ReportStatus::Resolved),
        ]
    }

    proptest! {
        /// Every permitted edge strictly increases the lifecycle ordinal.
        #[test]
        fn transitions_only_move_forward(from in any_status(), to in any_status()) {
            if from.can_transition_to(to) {
                prop_assert!(to.ordinal() > from.ordinal());
            }
        }

        /// Every forward move is permitted.
        #[test]
        fn every_forward_move_is_allowed(from in any_status(), to in any_status()) {
            if to.ordinal() > from.ordinal() {
                prop_assert!(from.can_transition_to(to));
            }
        }
    }
}
