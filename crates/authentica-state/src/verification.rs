//! # Verification Outcomes
//!
//! Result of checking a product's authenticity. `Pending` is never the
//! outcome of a live check; those resolve to one of the other three.

use serde::{Deserialize, Serialize};

/// Outcome of a product authenticity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Verified authentic.
    Verified,
    /// Appears genuine but needs further checks.
    Warning,
    /// Could not be verified; likely counterfeit.
    Fake,
    /// Check not yet complete.
    Pending,
}

impl VerificationStatus {
    /// Short badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Authentic",
            Self::Warning => "Suspicious",
            Self::Fake => "Counterfeit",
            Self::Pending => "Pending",
        }
    }

    /// Headline shown with a verification result.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Verified => "Authentic Product",
            Self::Warning => "Verification Warning",
            Self::Fake => "Counterfeit Alert",
            Self::Pending => "Verification Status",
        }
    }

    /// Explanatory text shown with a verification result.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified => "This product has been verified as authentic.",
            Self::Warning => "This product appears genuine but requires further verification.",
            Self::Fake => "This product could not be verified and may be counterfeit.",
            Self::Pending => "Status unknown.",
        }
    }

    /// Whether a live result with this status goes into the recent-scans list.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, Self::Fake)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Verified => "verified",
            Self::Warning => "warning",
            Self::Fake => "fake",
            Self::Pending => "pending",
        })
    }
}
