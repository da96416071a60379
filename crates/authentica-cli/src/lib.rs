//! # authentica-cli — CLI Tool for Authentica
//!
//! Provides the `authentica` command-line interface over the report
//! lifecycle manager and the product verifier.
//!
//! ## Subcommands
//!
//! - `authentica report submit` — Walk the wizard with the given fields and submit.
//! - `authentica report demo` — Scripted lifecycle: submit, transition, filter.
//! - `authentica report issue-types` — List the issue categories.
//! - `authentica verify otp <CODE>` — Check a five-character product code.
//! - `authentica verify qr [--seed N]` — Simulated camera scan.
//!
//! ```bash
//! authentica report submit --store-name Shoprite --location Sandton \
//!     --issue-type Counterfeit --description "Packaging tampered" \
//!     --purchase-info "Receipt #123" --photo front.jpg:image/jpeg:20480
//! authentica --json verify otp 12345
//! ```

pub mod report;
pub mod verify;

use anyhow::Result;
use serde::Serialize;

use authentica_core::{AppConfig, AuthenticaError};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `OK:` lines and indented listings.
    Text,
    /// Pretty-printed JSON documents.
    Json,
}

impl OutputFormat {
    /// JSON when `json` is set, text otherwise.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(AuthenticaError::from)?;
    println!("{json}");
    Ok(())
}

/// Apply command-line overrides to the environment configuration.
pub fn apply_overrides(mut config: AppConfig, no_delay: bool) -> AppConfig {
    if no_delay {
        config.submit_latency = std::time::Duration::ZERO;
        config.success_display = std::time::Duration::ZERO;
        config.verify_latency = std::time::Duration::ZERO;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn no_delay_zeroes_latencies_only() {
        let config = AppConfig {
            max_photos: Some(3),
            ..AppConfig::default()
        };
        let config = apply_overrides(config, true);
        assert_eq!(config.submit_latency, Duration::ZERO);
        assert_eq!(config.verify_latency, Duration::ZERO);
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
        assert_eq!(config.max_photos, Some(3));
    }

    #[test]
    fn overrides_off_keeps_config() {
        assert_eq!(
            apply_overrides(AppConfig::default(), false),
            AppConfig::default()
        );
    }

    #[test]
    fn unserializable_output_is_a_serialization_error() {
        let mut value = std::collections::BTreeMap::new();
        value.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");
        let err = print_json(&value).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuthenticaError>(),
            Some(AuthenticaError::Serialization(_))
        ));
    }

    #[test]
    fn output_format_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Text);
    }
}
