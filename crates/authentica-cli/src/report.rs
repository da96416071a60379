//! # Report Subcommand
//!
//! Drives a [`ReportSession`] from the command line. Each invocation owns a
//! fresh in-memory store.
//!
//! ## Subcommands
//!
//! - `submit` — Fill the wizard from flags, advance through all three steps,
//!   and submit.
//! - `demo` — File four sample reports, move two of them along the
//!   lifecycle, show a rejected transition, and list by filter.
//! - `issue-types` — Print the issue categories offered by the form.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use authentica_core::{AppConfig, AuthenticaError, ReportId};
use authentica_reports::{DraftField, ReportSession, SessionSnapshot, StatusFilter, StepOutcome};
use authentica_state::{PhotoHandle, Report, ReportStatus, ISSUE_TYPES};

use crate::{print_json, OutputFormat};

/// Arguments for the `authentica report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// Report subcommands.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// File a report through the three-step wizard.
    Submit {
        /// Store where the product was bought.
        #[arg(long)]
        store_name: String,
        /// Store location.
        #[arg(long)]
        location: String,
        /// Issue category (see `report issue-types`).
        #[arg(long)]
        issue_type: String,
        /// What is wrong with the product.
        #[arg(long)]
        description: String,
        /// Receipt number, date or price.
        #[arg(long)]
        purchase_info: String,
        /// Photo as `name:content/type:size`. Repeatable.
        #[arg(long = "photo", value_parser = parse_photo)]
        photos: Vec<PhotoHandle>,
    },

    /// Run a scripted report lifecycle.
    Demo,

    /// List the issue categories.
    IssueTypes,
}

/// Execute the report subcommand.
pub async fn run_report(args: &ReportArgs, config: &AppConfig, format: OutputFormat) -> Result<u8> {
    match &args.command {
        ReportCommand::Submit {
            store_name,
            location,
            issue_type,
            description,
            purchase_info,
            photos,
        } => {
            let input = SubmitInput {
                store_name,
                location,
                issue_type,
                description,
                purchase_info,
                photos,
            };
            cmd_submit(config, &input, format).await
        }
        ReportCommand::Demo => cmd_demo(config, format).await,
        ReportCommand::IssueTypes => cmd_issue_types(format),
    }
}

/// Parse `name:content/type:size`. The name may itself contain colons.
fn parse_photo(raw: &str) -> Result<PhotoHandle, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(size), Some(content_type), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected name:content/type:size, got {raw:?}"));
    };
    if name.is_empty() {
        return Err(format!("photo name is empty in {raw:?}"));
    }
    let size_bytes = size
        .parse::<u64>()
        .map_err(|_| format!("photo size must be a byte count, got {size:?}"))?;
    Ok(PhotoHandle::new(name, content_type, size_bytes))
}

struct SubmitInput<'a> {
    store_name: &'a str,
    location: &'a str,
    issue_type: &'a str,
    description: &'a str,
    purchase_info: &'a str,
    photos: &'a [PhotoHandle],
}

/// Fill the session's wizard from `input` and submit it.
async fn file_report(session: &mut ReportSession, input: &SubmitInput<'_>) -> Result<ReportId> {
    if !ISSUE_TYPES.contains(&input.issue_type) {
        tracing::warn!(issue_type = input.issue_type, "issue type is not one of the listed categories");
    }
    let fields = [
        (DraftField::StoreName, input.store_name),
        (DraftField::Location, input.location),
        (DraftField::IssueType, input.issue_type),
        (DraftField::Description, input.description),
        (DraftField::PurchaseInfo, input.purchase_info),
    ];
    for (field, value) in fields {
        session.set_field(field, value).map_err(AuthenticaError::from)?;
    }
    session
        .add_photos(input.photos.iter().cloned())
        .map_err(AuthenticaError::from)
        .context("photos rejected")?;

    loop {
        match session.advance().map_err(AuthenticaError::from)? {
            StepOutcome::Moved(step) => tracing::debug!(%step, "wizard advanced"),
            StepOutcome::Blocked { missing } => {
                let step = session.wizard().step();
                bail!("step {step} is incomplete: missing {missing:?}");
            }
            StepOutcome::SubmissionStarted => break,
        }
    }

    session
        .finish_submission()
        .await
        .map_err(AuthenticaError::from)
        .context("report submission failed")
}

async fn cmd_submit(config: &AppConfig, input: &SubmitInput<'_>, format: OutputFormat) -> Result<u8> {
    let mut session = ReportSession::new(config.clone());
    let id = file_report(&mut session, input).await?;

    match format {
        OutputFormat::Json => {
            let report = session
                .store()
                .get(id)
                .with_context(|| format!("report {id} missing after submit"))?;
            print_json(&report)?;
        }
        OutputFormat::Text => {
            println!("OK: submitted {id}");
            let report = session.store().get(id);
            if let Some(report) = report {
                print_report(&report);
            }
        }
    }
    Ok(0)
}

const DEMO_REPORTS: [(&str, &str, &str, &str, &str); 4] = [
    ("Shoprite", "Sandton", "Counterfeit", "Packaging tampered", "Receipt #123"),
    ("Pick n Pay", "Rosebank", "Expired", "Best-before date passed", "Receipt #456"),
    ("Checkers", "Fourways", "Damaged", "Seal broken on arrival", "Card payment 12/03"),
    ("Woolworths", "Melrose Arch", "Packaging Issue", "Logo misprinted", "Receipt #789"),
];

#[derive(Serialize)]
struct DemoOutput<'a> {
    all: &'a SessionSnapshot,
    submitted: &'a SessionSnapshot,
    rejected_transition: Option<String>,
}

async fn cmd_demo(config: &AppConfig, format: OutputFormat) -> Result<u8> {
    let mut session = ReportSession::new(config.clone());
    let mut ids = Vec::with_capacity(DEMO_REPORTS.len());

    for (store_name, location, issue_type, description, purchase_info) in DEMO_REPORTS {
        let input = SubmitInput {
            store_name,
            location,
            issue_type,
            description,
            purchase_info,
            photos: &[],
        };
        ids.push(file_report(&mut session, &input).await?);
    }

    session
        .transition(ids[1], ReportStatus::InProgress)
        .map_err(AuthenticaError::from)?;
    session
        .transition(ids[2], ReportStatus::Resolved)
        .map_err(AuthenticaError::from)?;

    // Resolved reports stay resolved.
    let rejected = session.transition(ids[2], ReportStatus::InProgress);
    if let Err(e) = &rejected {
        tracing::info!(code = e.code(), "reopen rejected as expected");
    }

    session.set_filter(StatusFilter::Only(ReportStatus::Submitted));
    let submitted = session.snapshot();
    session.set_filter(StatusFilter::All);
    let all = session.snapshot();

    match format {
        OutputFormat::Json => {
            print_json(&DemoOutput {
                all: &all,
                submitted: &submitted,
                rejected_transition: rejected.err().map(|e| e.to_string()),
            })?;
        }
        OutputFormat::Text => {
            print_listing(&all);
            println!();
            print_listing(&submitted);
            println!();
            match rejected {
                Err(e) => println!("Rejected: {e}"),
                Ok(_) => bail!("resolved report {} was reopened", ids[2]),
            }
        }
    }
    Ok(0)
}

fn cmd_issue_types(format: OutputFormat) -> Result<u8> {
    match format {
        OutputFormat::Json => print_json(&ISSUE_TYPES)?,
        OutputFormat::Text => {
            for issue in ISSUE_TYPES {
                println!("{issue}");
            }
        }
    }
    Ok(0)
}

fn print_listing(snapshot: &SessionSnapshot) {
    println!(
        "Reports ({} of {}, filter: {}):",
        snapshot.reports.len(),
        snapshot.total_reports,
        snapshot.filter
    );
    for report in &snapshot.reports {
        println!(
            "  {}  {:<12} {}, {}  [{}]  {}",
            report.id,
            report.details.issue_type,
            report.details.store_name,
            report.details.location,
            report.status(),
            report.display_date()
        );
    }
}

fn print_report(report: &Report) {
    println!("  Status: {}", report.status());
    println!("  Store: {}, {}", report.details.store_name, report.details.location);
    println!("  Issue: {}", report.details.issue_type);
    println!("  Description: {}", report.details.description);
    println!("  Purchase: {}", report.details.purchase_info);
    println!("  Date: {}", report.display_date());
    println!("  Photos: {}", report.photos.len());
    for photo in &report.photos {
        println!(
            "    {} ({}, {} bytes)",
            photo.file_name, photo.content_type, photo.size_bytes
        );
    }
}
