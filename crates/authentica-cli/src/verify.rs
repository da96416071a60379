//! # Verify Subcommand
//!
//! Product authenticity checks against the simulated verifier. Exit code is
//! 0 for authentic and suspicious products and 2 for counterfeits.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use authentica_core::{AppConfig, AuthenticaError};
use authentica_state::VerificationStatus;
use authentica_verify::{ScanHistory, ScanRecord, Verification, Verifier};

use crate::{print_json, OutputFormat};

/// Exit code for a counterfeit result.
const COUNTERFEIT_EXIT: u8 = 2;

/// Arguments for the `authentica verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(subcommand)]
    pub command: VerifyCommand,
}

/// Verify subcommands.
#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Check the five-character code printed on the product.
    Otp {
        /// Product code.
        code: String,
    },

    /// Simulate a camera scan.
    Qr {
        /// Seed for a reproducible scan outcome.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Execute the verify subcommand.
pub async fn run_verify(args: &VerifyArgs, config: &AppConfig, format: OutputFormat) -> Result<u8> {
    let mut verifier = Verifier::from_config(config);
    let verification = match &args.command {
        VerifyCommand::Otp { code } => verify_otp(&mut verifier, code).await?,
        VerifyCommand::Qr { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            verifier.verify_qr(&mut rng).await
        }
    };

    print_outcome(&verification, verifier.history(), format)?;
    Ok(exit_code(verification.status))
}

async fn verify_otp(verifier: &mut Verifier, code: &str) -> Result<Verification> {
    for (index, ch) in code.chars().enumerate() {
        verifier
            .set_digit(index, &ch.to_string())
            .map_err(AuthenticaError::from)
            .with_context(|| format!("code {code:?} is too long"))?;
    }
    verifier
        .verify_otp()
        .await
        .map_err(AuthenticaError::from)
        .with_context(|| format!("cannot verify code {code:?}"))
}

fn exit_code(status: VerificationStatus) -> u8 {
    match status {
        VerificationStatus::Fake => COUNTERFEIT_EXIT,
        _ => 0,
    }
}

/// Dashboard tallies over the recent-scans list.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct ScanSummary {
    authentic: usize,
    counterfeit: usize,
    shown: usize,
    limit: usize,
}

impl ScanSummary {
    fn of(history: &ScanHistory) -> Self {
        Self {
            authentic: history.count(VerificationStatus::Verified),
            counterfeit: history.count(VerificationStatus::Fake),
            shown: history.len(),
            limit: history.limit(),
        }
    }
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    verification: &'a Verification,
    title: &'static str,
    message: &'static str,
    summary: ScanSummary,
    recent_scans: &'a [ScanRecord],
}

fn print_outcome(
    verification: &Verification,
    history: &ScanHistory,
    format: OutputFormat,
) -> Result<()> {
    let summary = ScanSummary::of(history);
    match format {
        OutputFormat::Json => print_json(&VerifyOutput {
            verification,
            title: verification.title(),
            message: verification.message(),
            summary,
            recent_scans: history.records(),
        })?,
        OutputFormat::Text => {
            println!("{} [{}]", verification.title(), verification.status.label());
            println!("  {}", verification.message());
            println!(
                "Authentic products: {}  Counterfeit products: {}",
                summary.authentic, summary.counterfeit
            );
            println!("Recent scans ({} of {}):", summary.shown, summary.limit);
            for scan in history.records() {
                println!("  {:<20} {:<12} {}", scan.name, scan.status.label(), scan.date);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn immediate() -> Verifier {
        Verifier::from_config(&AppConfig::immediate())
    }

    #[tokio::test]
    async fn otp_code_classified() {
        let mut verifier = immediate();
        let result = verify_otp(&mut verifier, "12345").await.unwrap();
        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(verifier.history().records()[0].name, "Product #12345");
    }

    #[tokio::test]
    async fn long_code_rejected() {
        let mut verifier = immediate();
        let err = verify_otp(&mut verifier, "123456").await.unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[tokio::test]
    async fn short_code_rejected() {
        let mut verifier = immediate();
        let err = verify_otp(&mut verifier, "12").await.unwrap_err();
        assert!(err.to_string().contains("cannot verify"));
        assert!(matches!(
            err.downcast_ref::<AuthenticaError>(),
            Some(AuthenticaError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn summary_tracks_recorded_scans() {
        let mut verifier = immediate();
        let before = ScanSummary::of(verifier.history());
        assert_eq!(before.counterfeit, 1);

        verify_otp(&mut verifier, "12345").await.unwrap();
        let after = ScanSummary::of(verifier.history());
        assert_eq!(after.authentic, before.authentic + 1);
        assert_eq!(after.shown, after.limit.min(before.shown + 1));
    }

    #[tokio::test]
    async fn counterfeit_exit_code() {
        let args = VerifyArgs {
            command: VerifyCommand::Otp {
                code: "99999".to_string(),
            },
        };
        let code = run_verify(&args, &AppConfig::immediate(), OutputFormat::Json)
            .await
            .unwrap();
        assert_eq!(code, COUNTERFEIT_EXIT);
    }

    #[tokio::test]
    async fn seeded_qr_is_reproducible() {
        let args = VerifyArgs {
            command: VerifyCommand::Qr { seed: Some(11) },
        };
        let first = run_verify(&args, &AppConfig::immediate(), OutputFormat::Text)
            .await
            .unwrap();
        let second = run_verify(&args, &AppConfig::immediate(), OutputFormat::Text)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(VerificationStatus::Verified), 0);
        assert_eq!(exit_code(VerificationStatus::Warning), 0);
        assert_eq!(exit_code(VerificationStatus::Fake), COUNTERFEIT_EXIT);
    }
}
