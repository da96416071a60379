//! # QR Scan Classification
//!
//! No code is decoded. A scan draws a uniform sample from the supplied
//! random source and classifies it against fixed thresholds.

use rand::Rng;

use authentica_state::VerificationStatus;

/// Samples above this are authentic.
const VERIFIED_ABOVE: f64 = 0.7;
/// Samples above this (and not above [`VERIFIED_ABOVE`]) need further checks.
const WARNING_ABOVE: f64 = 0.4;

/// Classify a sample from `[0, 1)`.
pub fn classify_sample(r: f64) -> VerificationStatus {
    if r > VERIFIED_ABOVE {
        VerificationStatus::Verified
    } else if r > WARNING_ABOVE {
        VerificationStatus::Warning
    } else {
        VerificationStatus::Fake
    }
}

/// Draw one sample from `rng` and classify it.
pub fn sample_scan<R: Rng + ?Sized>(rng: &mut R) -> VerificationStatus {
    classify_sample(rng.gen::<f64>())
}
