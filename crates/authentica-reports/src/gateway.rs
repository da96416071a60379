//! # Submission Gateway
//!
//! The asynchronous boundary a finished draft crosses on its way to becoming
//! a stored report. Only the gateway knows how a submission is delivered;
//! the session only awaits its answer.

use std::time::Duration;

use async_trait::async_trait;

use authentica_core::AppConfig;

use crate::draft::WizardDraft;
use crate::error::ReportError;

/// Delivers a completed draft.
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Submit `draft`. On `Ok` the session records the report locally.
    async fn submit(&self, draft: &WizardDraft) -> Result<(), ReportError>;
}

/// Gateway that answers after a fixed delay without any I/O.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedGateway {
    /// Accept every submission after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Reject every submission with `reason` after `latency`.
    pub fn failing(latency: Duration, reason: impl Into<String>) -> Self {
        Self {
            latency,
            failure: Some(reason.into()),
        }
    }

    /// Accepting gateway using the configured submit latency.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.submit_latency)
    }
}

#[async_trait]
impl ReportGateway for SimulatedGateway {
    async fn submit(&self, draft: &WizardDraft) -> Result<(), ReportError> {
        tracing::debug!(
            latency_ms = self.latency.as_millis() as u64,
            photos = draft.photos().len(),
            "simulating report submission"
        );
        tokio::time::sleep(self.latency).await;
        match &self.failure {
            Some(reason) => Err(ReportError::Gateway(reason.clone())),
            None => Ok(()),
        }
    }
}
