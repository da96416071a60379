//! # Report Session
//!
//! The application-state controller for the reports screen. One session
//! owns the wizard, the store handle, the selection, the filter and the
//! submission phase; presentation bindings hold a reference to it and
//! re-render from [`ReportSession::snapshot`] after every call.
//!
//! ## Submission
//!
//! ```text
//! Idle ──start_submission──▶ Submitting ──finish_submission──▶ Succeeded ──(display interval)──▶ Idle
//!                               │
//!                               └──gateway error / timeout──▶ Failed ──start_submission──▶ Submitting
//! ```
//!
//! `start_submission` spawns the gateway call as a tokio task so the
//! "submitting" state is observable while the call is in flight;
//! `finish_submission` awaits it and applies the outcome. [`submit`] does
//! both.
//!
//! [`submit`]: ReportSession::submit

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use authentica_core::{AppConfig, ReportId, Timestamp};
use authentica_state::{PhotoHandle, Report, ReportStatus};

use crate::draft::{DraftField, PhotoPolicy, WizardDraft};
use crate::error::ReportError;
use crate::filter::StatusFilter;
use crate::gateway::{ReportGateway, SimulatedGateway};
use crate::intent::NavigationIntent;
use crate::snapshot::{ReportView, SessionSnapshot, SubmissionPhase};
use crate::store::ReportStore;
use crate::wizard::{Advance, StepWizard, WizardStep};

/// Result of [`ReportSession::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to this step.
    Moved(WizardStep),
    /// Step incomplete; nothing changed.
    Blocked {
        /// Empty required fields.
        missing: Vec<DraftField>,
    },
    /// Last step completed; the submission task is running.
    SubmissionStarted,
}

type PendingSubmission = JoinHandle<(WizardDraft, Result<(), ReportError>)>;

/// Controller for the reports screen.
pub struct ReportSession {
    config: AppConfig,
    store: ReportStore,
    gateway: Arc<dyn ReportGateway>,
    wizard: StepWizard,
    phase: SubmissionPhase,
    pending: Option<PendingSubmission>,
    selected: Option<ReportId>,
    filter: StatusFilter,
    view: ReportView,
    intents: Vec<NavigationIntent>,
}

impl std::fmt::Debug for ReportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSession")
            .field("config", &self.config)
            .field("reports", &self.store.len())
            .field("step", &self.wizard.step())
            .field("phase", &self.phase)
            .field("selected", &self.selected)
            .field("filter", &self.filter)
            .field("view", &self.view)
            .finish()
    }
}

impl ReportSession {
    /// Session with a fresh store and the simulated gateway.
    pub fn new(config: AppConfig) -> Self {
        let gateway = SimulatedGateway::from_config(&config);
        Self::with_gateway(config, ReportStore::new(), Arc::new(gateway))
    }

    /// Session over an existing store and a custom gateway.
    pub fn with_gateway(
        config: AppConfig,
        store: ReportStore,
        gateway: Arc<dyn ReportGateway>,
    ) -> Self {
        let policy = PhotoPolicy::from(&config);
        Self {
            config,
            store,
            gateway,
            wizard: StepWizard::new(policy),
            phase: SubmissionPhase::Idle,
            pending: None,
            selected: None,
            filter: StatusFilter::All,
            view: ReportView::NewReport,
            intents: Vec::new(),
        }
    }

    /// Handle to the underlying store.
    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Wizard state.
    pub fn wizard(&self) -> &StepWizard {
        &self.wizard
    }

    /// Submission phase.
    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    // ── Draft editing ────────────────────────────────────────────────

    /// The draft is frozen while the gateway holds a copy of it.
    fn ensure_editable(&self) -> Result<(), ReportError> {
        if self.phase.is_submitting() {
            tracing::warn!("draft edit rejected while submitting");
            return Err(ReportError::SubmissionInProgress);
        }
        Ok(())
    }

    /// Overwrite a text field of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::SubmissionInProgress`] while a submission is
    /// in flight.
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), ReportError> {
        self.ensure_editable()?;
        self.wizard.set_field(field, value);
        Ok(())
    }

    /// Attach photos from the file picker.
    pub fn add_photos(
        &mut self,
        handles: impl IntoIterator<Item = PhotoHandle>,
    ) -> Result<usize, ReportError> {
        self.ensure_editable()?;
        let added = self.wizard.add_photos(handles).map_err(|e| {
            tracing::warn!(error = %e, "photos rejected");
            e
        })?;
        tracing::debug!(added, total = self.wizard.draft().photos().len(), "photos attached");
        Ok(added)
    }

    /// Detach the photo at `index`.
    pub fn remove_photo(&mut self, index: usize) -> Result<PhotoHandle, ReportError> {
        self.ensure_editable()?;
        self.wizard.remove_photo(index).map_err(|e| {
            tracing::warn!(error = %e, index, "photo removal rejected");
            e
        })
    }

    /// Abandon the draft and return the wizard to step 1.
    ///
    /// An in-flight submission is aborted and never filed.
    pub fn discard_draft(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            tracing::info!("in-flight submission aborted");
        }
        tracing::debug!("draft discarded");
        self.wizard.reset();
        if matches!(
            self.phase,
            SubmissionPhase::Submitting | SubmissionPhase::Failed { .. }
        ) {
            self.phase = SubmissionPhase::Idle;
        }
    }

    // ── Wizard navigation ────────────────────────────────────────────

    /// Whether `step` has all its required fields.
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.wizard.is_step_complete(step)
    }

    /// Move forward; on the last step, start the submission.
    ///
    /// # Errors
    ///
    /// Only the submission can fail here; see [`Self::start_submission`].
    pub fn advance(&mut self) -> Result<StepOutcome, ReportError> {
        if self.phase.is_submitting() {
            return Err(ReportError::SubmissionInProgress);
        }
        match self.wizard.advance() {
            Advance::Moved(step) => Ok(StepOutcome::Moved(step)),
            Advance::Blocked { missing } => Ok(StepOutcome::Blocked { missing }),
            Advance::ReadyToSubmit => {
                self.start_submission()?;
                Ok(StepOutcome::SubmissionStarted)
            }
        }
    }

    /// Move back one step; no-op on step 1.
    pub fn retreat(&mut self) -> Result<WizardStep, ReportError> {
        self.ensure_editable()?;
        Ok(self.wizard.retreat())
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validate the draft and hand it to the gateway in a background task.
    ///
    /// # Errors
    ///
    /// - [`ReportError::SubmissionInProgress`] if a submission is running.
    /// - [`ReportError::Validation`] if the current step or any required
    ///   field is incomplete.
    /// - [`ReportError::NoRuntime`] if called outside a tokio runtime.
    pub fn start_submission(&mut self) -> Result<(), ReportError> {
        if self.phase.is_submitting() {
            return Err(ReportError::SubmissionInProgress);
        }
        self.wizard.ensure_submittable().map_err(|e| {
            tracing::warn!(error = %e, "submission rejected");
            e
        })?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            tracing::warn!("submission rejected: no tokio runtime");
            ReportError::NoRuntime
        })?;

        let draft = self.wizard.draft().clone();
        let gateway = Arc::clone(&self.gateway);
        let timeout = self.config.submit_timeout;

        tracing::info!(
            store_name = %draft.details.store_name,
            issue_type = %draft.details.issue_type,
            photos = draft.photos().len(),
            "submitting report"
        );

        self.pending = Some(runtime.spawn(async move {
            let outcome = match tokio::time::timeout(timeout, gateway.submit(&draft)).await {
                Ok(result) => result,
                Err(_) => Err(ReportError::Timeout(timeout)),
            };
            (draft, outcome)
        }));
        self.phase = SubmissionPhase::Submitting;
        Ok(())
    }

    /// Await the running submission and apply its outcome.
    ///
    /// On success the report is appended to the store, the wizard is reset
    /// to an empty step 1, and the success confirmation is raised for the
    /// configured display interval. On failure the draft is kept.
    pub async fn finish_submission(&mut self) -> Result<ReportId, ReportError> {
        let handle = self.pending.take().ok_or(ReportError::NoSubmissionPending)?;

        let (draft, outcome) = match handle.await {
            Ok(done) => done,
            Err(join_err) => {
                let err = ReportError::Gateway(format!("submission task failed: {join_err}"));
                return Err(self.fail_submission(err));
            }
        };

        if let Err(err) = outcome {
            return Err(self.fail_submission(err));
        }

        let (details, photos) = draft.into_parts();
        let report = Report::submitted(self.store.next_id(), details, photos, Timestamp::now())
            .map_err(|e| self.fail_submission(ReportError::Validation(e.to_string())))?;
        let id = report.id;
        if let Err(e) = self.store.append(report) {
            return Err(self.fail_submission(e));
        }

        self.wizard.reset();
        self.phase = SubmissionPhase::Succeeded {
            report_id: id,
            until: Instant::now() + self.config.success_display,
        };
        self.intents.push(NavigationIntent::ReportSubmitted(id));
        tracing::info!(report_id = %id, total = self.store.len(), "report submitted");
        Ok(id)
    }

    /// Start a submission and wait for it.
    pub async fn submit(&mut self) -> Result<ReportId, ReportError> {
        self.start_submission()?;
        self.finish_submission().await
    }

    fn fail_submission(&mut self, err: ReportError) -> ReportError {
        tracing::warn!(error = %err, code = err.code(), "report submission failed");
        self.phase = SubmissionPhase::Failed {
            reason: err.to_string(),
        };
        err
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.phase.is_submitting()
    }

    /// Whether the success confirmation is showing.
    pub fn submission_success(&self) -> bool {
        self.phase.is_success_visible(Instant::now())
    }

    /// Drop an expired success confirmation. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if matches!(self.phase, SubmissionPhase::Succeeded { .. }) && !self.submission_success() {
            self.phase = SubmissionPhase::Idle;
            return true;
        }
        false
    }

    // ── Report management ────────────────────────────────────────────

    /// Show the detail panel for `id`.
    pub fn select_report(&mut self, id: ReportId) -> Result<Report, ReportError> {
        let report = self.store.get(id).ok_or(ReportError::NotFound(id))?;
        self.selected = Some(id);
        self.view = ReportView::ReportList;
        self.intents.push(NavigationIntent::ShowReportDetail(id));
        Ok(report)
    }

    /// Close the detail panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.intents.push(NavigationIntent::ShowReportList);
    }

    /// The selected report as currently stored.
    pub fn selected_report(&self) -> Option<Report> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// Switch between the wizard and the report list. Clears the selection.
    pub fn toggle_view(&mut self) -> ReportView {
        self.selected = None;
        self.view = match self.view {
            ReportView::NewReport => {
                self.intents.push(NavigationIntent::ShowReportList);
                ReportView::ReportList
            }
            ReportView::ReportList => {
                self.intents.push(NavigationIntent::ShowNewReportForm);
                ReportView::NewReport
            }
        };
        self.view
    }

    /// Change the list filter.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        tracing::debug!(%filter, "report filter changed");
        self.filter = filter;
    }

    /// Reports passing the active filter.
    pub fn filtered_reports(&self) -> Vec<Report> {
        self.store.filtered(self.filter)
    }

    /// Move report `id` to `target`.
    ///
    /// # Errors
    ///
    /// - [`ReportError::NotFound`] if no report has this id.
    /// - [`ReportError::InvalidTransition`] if the move is not a forward
    ///   edge of the lifecycle.
    pub fn transition(&mut self, id: ReportId, target: ReportStatus) -> Result<Report, ReportError> {
        let outcome = self
            .store
            .try_update(id, |report| {
                let from = report.status();
                report
                    .transition(target)
                    .map(|()| report.clone())
                    .map_err(|_| ReportError::InvalidTransition { from, to: target })
            })
            .ok_or(ReportError::NotFound(id))?;

        match outcome {
            Ok(report) => {
                tracing::info!(report_id = %id, status = %target, "report status changed");
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(report_id = %id, error = %e, "report transition rejected");
                Err(e)
            }
        }
    }

    /// Move the selected report to `target`.
    pub fn transition_selected(&mut self, target: ReportStatus) -> Result<Report, ReportError> {
        let id = self.selected.ok_or(ReportError::NothingSelected)?;
        self.transition(id, target)
    }

    // ── Presentation boundary ────────────────────────────────────────

    /// Take the navigation intents emitted since the last call.
    pub fn drain_intents(&mut self) -> Vec<NavigationIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Capture the screen state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_step: self.wizard.step(),
            draft: self.wizard.draft().clone(),
            is_step_complete: self.wizard.is_current_step_complete(),
            reports: self.filtered_reports(),
            total_reports: self.store.len(),
            selected_report: self.selected_report(),
            filter: self.filter,
            view: self.view,
            is_submitting: self.is_submitting(),
            submission_success: self.submission_success(),
            submission_error: self.phase.failure().map(str::to_string),
        }
    }
}
