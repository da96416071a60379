//! # authentica-verify — Product Verification
//!
//! The dashboard's "is this product genuine?" flow:
//!
//! - **OTP entry** (`otp.rs`): five single-character slots with focus
//!   movement on entry and backspace.
//! - **Classification** (`otp.rs`, `qr.rs`): map a code or a scan sample to a
//!   [`VerificationStatus`]. QR scans take their randomness from an injected
//!   [`rand::Rng`].
//! - **History** (`history.rs`): the capped, newest-first recent-scans list.
//! - **Verifier** (`verifier.rs`): ties the above together behind an
//!   asynchronous check with the configured latency.
//!
//! [`VerificationStatus`]: authentica_state::VerificationStatus

pub mod error;
pub mod history;
pub mod otp;
pub mod qr;
pub mod verifier;

pub use error::VerifyError;
pub use history::{ScanHistory, ScanRecord};
pub use otp::{classify_code, OtpEntry, OTP_LENGTH};
pub use qr::{classify_sample, sample_scan};
pub use verifier::{ScanMethod, Verification, Verifier};
