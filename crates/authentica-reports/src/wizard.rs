//! # Step Wizard
//!
//! Linear three-step form:
//!
//! ```text
//! 1 Details ──▶ 2 Description ──▶ 3 Photos ──▶ submit
//!  store_name     description       photos
//!  location       purchase_info     (optional)
//!  issue_type
//! ```
//!
//! Forward movement requires the current step's fields to be filled in.
//! Blocked moves are no-ops: step and draft stay as they were.

use serde::{Deserialize, Serialize};

use authentica_state::PhotoHandle;

use crate::draft::{DraftField, PhotoPolicy, WizardDraft};
use crate::error::ReportError;

/// A step of the report wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    /// Store, location, issue type.
    Details,
    /// Description and purchase information.
    Description,
    /// Photo attachments.
    Photos,
}

impl WizardStep {
    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Description => 2,
            Self::Photos => 3,
        }
    }

    /// Step for a 1-based number.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Details),
            2 => Some(Self::Description),
            3 => Some(Self::Photos),
            _ => None,
        }
    }

    /// Heading shown in the stepper.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Description => "Description",
            Self::Photos => "Photos",
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any.
    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Fields that must be non-empty to leave this step.
    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            Self::Details => &[DraftField::StoreName, DraftField::Location, DraftField::IssueType],
            Self::Description => &[DraftField::Description, DraftField::PurchaseInfo],
            Self::Photos => &[],
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| format!("wizard step must be 1..=3, got {n}"))
    }
}

/// Result of [`StepWizard::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward to this step.
    Moved(WizardStep),
    /// On the last step with everything filled in; the caller submits.
    ReadyToSubmit,
    /// The current step is incomplete. Nothing changed.
    Blocked {
        /// Empty required fields of the current step.
        missing: Vec<DraftField>,
    },
}

/// Wizard controller. Owns the draft exclusively.
#[derive(Debug, Clone)]
pub struct StepWizard {
    step: WizardStep,
    draft: WizardDraft,
    policy: PhotoPolicy,
}

impl Default for StepWizard {
    fn default() -> Self {
        Self::new(PhotoPolicy::default())
    }
}

impl StepWizard {
    /// A wizard on step 1 with an empty draft.
    pub fn new(policy: PhotoPolicy) -> Self {
        Self {
            step: WizardStep::Details,
            draft: WizardDraft::new(),
            policy,
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Read access to the draft.
    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    /// Required fields of `step` that are still empty.
    pub fn missing_for_step(&self, step: WizardStep) -> Vec<DraftField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|f| self.draft.field(*f).trim().is_empty())
            .collect()
    }

    /// Whether `step` has all its required fields.
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.missing_for_step(step).is_empty()
    }

    /// Whether the current step has all its required fields.
    pub fn is_current_step_complete(&self) -> bool {
        self.is_step_complete(self.step)
    }

    /// Move forward if the current step is complete.
    pub fn advance(&mut self) -> Advance {
        let missing = self.missing_for_step(self.step);
        if !missing.is_empty() {
            tracing::debug!(step = %self.step, ?missing, "advance blocked");
            return Advance::Blocked { missing };
        }
        match self.step.next() {
            Some(next) => {
                tracing::debug!(from = %self.step, to = %next, "wizard advanced");
                self.step = next;
                Advance::Moved(next)
            }
            None => Advance::ReadyToSubmit,
        }
    }

    /// Move back one step. Returns the step now shown; no-op on step 1.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.step.previous() {
            tracing::debug!(from = %self.step, to = %prev, "wizard retreated");
            self.step = prev;
        }
        self.step
    }

    /// Check that the draft can be turned into a report right now.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] if the current step is incomplete
    /// or any required field of steps 1 and 2 is empty.
    pub fn ensure_submittable(&self) -> Result<(), ReportError> {
        let missing = self.missing_for_step(self.step);
        if !missing.is_empty() {
            return Err(ReportError::Validation(format!(
                "step {} is incomplete: missing {missing:?}",
                self.step
            )));
        }
        let missing = self.draft.details.missing_fields();
        if !missing.is_empty() {
            return Err(ReportError::Validation(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Overwrite a text field.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    /// Append photos under the wizard's policy.
    pub fn add_photos(
        &mut self,
        handles: impl IntoIterator<Item = PhotoHandle>,
    ) -> Result<usize, ReportError> {
        self.draft.add_photos(handles, &self.policy)
    }

    /// Remove the photo at `index`.
    pub fn remove_photo(&mut self, index: usize) -> Result<PhotoHandle, ReportError> {
        self.draft.remove_photo(index)
    }

    /// Clear the draft and return to step 1.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.step = WizardStep::Details;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fill_step_one(w: &mut StepWizard) {
        w.set_field(DraftField::StoreName, "Shoprite");
        w.set_field(DraftField::Location, "Sandton");
        w.set_field(DraftField::IssueType, "Counterfeit");
    }

    fn fill_step_two(w: &mut StepWizard) {
        w.set_field(DraftField::Description, "Packaging tampered");
        w.set_field(DraftField::PurchaseInfo, "Receipt #123");
    }

    #[test]
    fn starts_on_step_one() {
        let w = StepWizard::default();
        assert_eq!(w.step(), WizardStep::Details);
        assert!(w.draft().is_empty());
    }

    #[test]
    fn step_completeness_rules() {
        let mut w = StepWizard::default();
        assert!(!w.is_step_complete(WizardStep::Details));
        assert!(!w.is_step_complete(WizardStep::Description));
        assert!(w.is_step_complete(WizardStep::Photos));

        fill_step_one(&mut w);
        assert!(w.is_step_complete(WizardStep::Details));
        fill_step_two(&mut w);
        assert!(w.is_step_complete(WizardStep::Description));
    }

    #[test]
    fn blocked_advance_changes_nothing() {
        let mut w = StepWizard::default();
        w.set_field(DraftField::StoreName, "Shoprite");
        let before = w.draft().clone();
        assert_eq!(
            w.advance(),
            Advance::Blocked {
                missing: vec![DraftField::Location, DraftField::IssueType]
            }
        );
        assert_eq!(w.step(), WizardStep::Details);
        assert_eq!(w.draft(), &before);
    }

    #[test]
    fn whitespace_does_not_count() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        w.set_field(DraftField::Location, "   ");
        assert!(matches!(w.advance(), Advance::Blocked { .. }));
    }

    #[test]
    fn full_walk_reaches_ready_to_submit() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        assert_eq!(w.advance(), Advance::Moved(WizardStep::Description));
        fill_step_two(&mut w);
        assert_eq!(w.advance(), Advance::Moved(WizardStep::Photos));
        assert_eq!(w.advance(), Advance::ReadyToSubmit);
        assert_eq!(w.step(), WizardStep::Photos);
        assert!(w.ensure_submittable().is_ok());
    }

    #[test]
    fn retreat_stops_at_step_one() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        w.advance();
        assert_eq!(w.retreat(), WizardStep::Details);
        assert_eq!(w.retreat(), WizardStep::Details);
    }

    #[test]
    fn retreat_keeps_entered_data() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        w.advance();
        fill_step_two(&mut w);
        w.retreat();
        assert_eq!(w.draft().details.description, "Packaging tampered");
    }

    #[test]
    fn not_submittable_when_earlier_step_cleared() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        w.advance();
        fill_step_two(&mut w);
        w.advance();
        w.set_field(DraftField::StoreName, "");
        assert!(matches!(w.ensure_submittable(), Err(ReportError::Validation(_))));
    }

    #[test]
    fn reset_returns_to_empty_step_one() {
        let mut w = StepWizard::default();
        fill_step_one(&mut w);
        w.advance();
        w.reset();
        assert_eq!(w.step(), WizardStep::Details);
        assert!(w.draft().is_empty());
    }

    #[test]
    fn step_serializes_as_number() {
        assert_eq!(serde_json::to_string(&WizardStep::Description).unwrap(), "2");
        let step: WizardStep = serde_json::from_str("3").unwrap();
        assert_eq!(step, WizardStep::Photos);
        assert!(serde_json::from_str::<WizardStep>("4").is_err());
    }

    fn any_field() -> impl Strategy<Value = DraftField> {
        prop_oneof![
            Just(DraftField::StoreName),
            Just(DraftField::Location),
            Just(DraftField::IssueType),
            Just(DraftField::Description),
            Just(DraftField::PurchaseInfo),
        ]
    }

    proptest! {
        /// Whatever subset of fields is filled, advancing from an
        /// incomplete step leaves step and draft untouched.
        #[test]
        fn incomplete_step_never_advances(
            edits in prop::collection::vec((any_field(), "[a-z ]{0,6}"), 0..10),
            moves in 0usize..3,
        ) {
            let mut w = StepWizard::default();
            for (field, value) in edits {
                w.set_field(field, value);
            }
            for _ in 0..moves {
                w.advance();
            }
            if !w.is_current_step_complete() {
                let step = w.step();
                let draft = w.draft().clone();
                let outcome = w.advance();
                prop_assert!(matches!(outcome, Advance::Blocked { .. }), "expected a blocked advance");
                prop_assert_eq!(w.step(), step);
                prop_assert_eq!(w.draft(), &draft);
            }
        }
    }
}
