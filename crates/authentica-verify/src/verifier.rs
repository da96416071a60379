//! # Verifier
//!
//! Owns the OTP boxes, the last result and the recent-scans list. A check
//! waits out the configured latency, classifies, and records non-counterfeit
//! results at the head of the history.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use authentica_core::{AppConfig, IdAllocator};
use authentica_state::VerificationStatus;

use crate::error::VerifyError;
use crate::history::{ScanHistory, ScanRecord};
use crate::otp::{classify_code, OtpEntry};
use crate::qr::sample_scan;

/// Name recorded for QR scans.
const QR_SCAN_NAME: &str = "Scanned Product";

/// How a product was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMethod {
    /// Code typed into the OTP boxes.
    Otp,
    /// Camera scan.
    Qr,
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// How the product was checked.
    pub method: ScanMethod,
    /// The code checked, for OTP checks.
    pub code: Option<String>,
    /// Result.
    pub status: VerificationStatus,
    /// The history row added, if the result was recorded.
    pub recorded: Option<ScanRecord>,
}

impl Verification {
    /// Headline for the result dialog.
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Body text for the result dialog.
    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}

/// Product verification controller.
#[derive(Debug)]
pub struct Verifier {
    latency: Duration,
    otp: OtpEntry,
    history: ScanHistory,
    ids: IdAllocator,
    last: Option<Verification>,
}

impl Verifier {
    /// Verifier with the given latency and starting history.
    pub fn new(latency: Duration, history: ScanHistory) -> Self {
        Self {
            latency,
            otp: OtpEntry::new(),
            history,
            ids: IdAllocator::new(),
            last: None,
        }
    }

    /// Verifier over the sample history, with configured latency and cap.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.verify_latency,
            ScanHistory::seeded(config.recent_scan_limit),
        )
    }

    /// OTP boxes.
    pub fn otp(&self) -> &OtpEntry {
        &self.otp
    }

    /// Recent scans.
    pub fn history(&self) -> &ScanHistory {
        &self.history
    }

    /// Result of the most recent check, until [`Self::reset`].
    pub fn last_result(&self) -> Option<&Verification> {
        self.last.as_ref()
    }

    /// Type into an OTP box. Returns the box that should take focus.
    pub fn set_digit(&mut self, index: usize, value: &str) -> Result<usize, VerifyError> {
        let focus = self.otp.set_digit(index, value)?;
        tracing::trace!(index, focus, "otp slot updated");
        Ok(focus)
    }

    /// Backspace in an OTP box. Returns the box that should take focus.
    pub fn backspace(&mut self, index: usize) -> Result<usize, VerifyError> {
        self.otp.backspace(index)
    }

    /// Check the code in the OTP boxes.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidCode`] unless every box is filled.
    pub async fn verify_otp(&mut self) -> Result<Verification, VerifyError> {
        if !self.otp.is_complete() {
            return Err(VerifyError::InvalidCode(format!(
                "all {} digits are required, got {:?}",
                self.otp.slots().len(),
                self.otp.code()
            )));
        }
        let code = self.otp.code();
        tokio::time::sleep(self.latency).await;

        let status = classify_code(&code);
        let name = format!("Product #{code}");
        Ok(self.conclude(ScanMethod::Otp, Some(code), name, status))
    }

    /// Scan a product, drawing the outcome from `rng`.
    pub async fn verify_qr<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Verification {
        let status = sample_scan(rng);
        tokio::time::sleep(self.latency).await;
        self.conclude(ScanMethod::Qr, None, QR_SCAN_NAME.to_string(), status)
    }

    fn conclude(
        &mut self,
        method: ScanMethod,
        code: Option<String>,
        name: String,
        status: VerificationStatus,
    ) -> Verification {
        let recorded = self.history.record(self.ids.next_scan_id(), name, status);
        if status.is_recorded() {
            tracing::info!(?method, %status, "product verified");
        } else {
            tracing::warn!(?method, %status, "product failed verification");
        }
        let verification = Verification {
            method,
            code,
            status,
            recorded,
        };
        self.last = Some(verification.clone());
        verification
    }

    /// Close the result dialog: forget the last result and empty the boxes.
    pub fn reset(&mut self) {
        self.otp.clear();
        self.last = None;
    }
}
