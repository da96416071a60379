//! # authentica CLI entry point
//!
//! Parses command-line arguments, loads configuration from the environment,
//! and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use authentica_cli::report::{run_report, ReportArgs};
use authentica_cli::verify::{run_verify, VerifyArgs};
use authentica_cli::{apply_overrides, OutputFormat};
use authentica_core::{AppConfig, AuthenticaError};

/// Authentica — product authentication and counterfeit reporting.
///
/// Files counterfeit reports through the three-step wizard, manages their
/// status, and verifies products by one-time code or QR scan.
#[derive(Parser, Debug)]
#[command(name = "authentica", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Skip simulated latencies.
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Counterfeit reports (submit, demo, issue-types).
    Report(ReportArgs),

    /// Product verification (otp, qr).
    Verify(VerifyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env().map_err(AuthenticaError::from) {
        Ok(config) => apply_overrides(config, cli.no_delay),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let format = OutputFormat::from_flag(cli.json);
    let result = match cli.command {
        Commands::Report(args) => run_report(&args, &config, format).await,
        Commands::Verify(args) => run_verify(&args, &config, format).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
