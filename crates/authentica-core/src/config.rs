//! # Runtime Configuration
//!
//! Timing and limit knobs for a session, loaded from `AUTHENTICA_*`
//! environment variables with defaults that reproduce the demo's behaviour.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Environment variable name.
        var: String,
        /// The raw value found.
        value: String,
    },
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated latency of a report submission.
    pub submit_latency: Duration,
    /// How long the submission-success flag stays raised.
    pub success_display: Duration,
    /// Upper bound on a single submission round-trip.
    pub submit_timeout: Duration,
    /// Simulated latency of an OTP or QR verification.
    pub verify_latency: Duration,
    /// Number of entries kept in the recent-scans list.
    pub recent_scan_limit: usize,
    /// Maximum photos per report. `None` means unlimited.
    pub max_photos: Option<usize>,
    /// Reject attachments whose content type is not `image/*`.
    pub images_only: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_latency: Duration::from_millis(1500),
            success_display: Duration::from_millis(3000),
            submit_timeout: Duration::from_secs(30),
            verify_latency: Duration::from_millis(1500),
            recent_scan_limit: 4,
            max_photos: None,
            images_only: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `AUTHENTICA_SUBMIT_LATENCY_MS` (default: 1500)
    /// - `AUTHENTICA_SUCCESS_DISPLAY_MS` (default: 3000)
    /// - `AUTHENTICA_SUBMIT_TIMEOUT_MS` (default: 30000)
    /// - `AUTHENTICA_VERIFY_LATENCY_MS` (default: 1500)
    /// - `AUTHENTICA_RECENT_SCAN_LIMIT` (default: 4)
    /// - `AUTHENTICA_MAX_PHOTOS` (default: unlimited)
    /// - `AUTHENTICA_IMAGES_ONLY` (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            submit_latency: millis(&lookup, "AUTHENTICA_SUBMIT_LATENCY_MS")?
                .unwrap_or(defaults.submit_latency),
            success_display: millis(&lookup, "AUTHENTICA_SUCCESS_DISPLAY_MS")?
                .unwrap_or(defaults.success_display),
            submit_timeout: millis(&lookup, "AUTHENTICA_SUBMIT_TIMEOUT_MS")?
                .unwrap_or(defaults.submit_timeout),
            verify_latency: millis(&lookup, "AUTHENTICA_VERIFY_LATENCY_MS")?
                .unwrap_or(defaults.verify_latency),
            recent_scan_limit: parsed(&lookup, "AUTHENTICA_RECENT_SCAN_LIMIT")?
                .unwrap_or(defaults.recent_scan_limit),
            max_photos: parsed(&lookup, "AUTHENTICA_MAX_PHOTOS")?,
            images_only: parsed(&lookup, "AUTHENTICA_IMAGES_ONLY")?
                .unwrap_or(defaults.images_only),
        })
    }

    /// Configuration with every simulated delay set to zero.
    pub fn immediate() -> Self {
        Self {
            submit_latency: Duration::ZERO,
            success_display: Duration::ZERO,
            verify_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value: raw,
            }),
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<Duration>, ConfigError> {
    Ok(parsed::<u64>(lookup, var)?.map(Duration::from_millis))
}
