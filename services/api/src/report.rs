use crate::cli::SnapshotSources;
use crate::infra::{LedgerSnapshot, SnapshotAccounting};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::fmt::Write as _;
use workers_control::accounting::details::{PayoutFactorDetails, PsfAccountDetails};
use workers_control::accounting::FrozenClock;
use workers_control::config::AppConfig;
use workers_control::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) sources: SnapshotSources,
    /// Evaluate at this instant (RFC 3339 or YYYY-MM-DD) instead of now
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Print the snapshot as JSON with unrounded decimals
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_payout_factor_report(args: ReportArgs) -> Result<(), AppError> {
    let accounting = snapshot_accounting(&args)?;
    let details = accounting.payout_factor_details()?;
    if args.json {
        print_json(&details);
    } else {
        print!("{}", render_payout_factor(&details));
    }
    Ok(())
}

pub(crate) fn run_psf_report(args: ReportArgs) -> Result<(), AppError> {
    let accounting = snapshot_accounting(&args)?;
    let details = accounting.psf_details()?;
    if args.json {
        print_json(&details);
    } else {
        print!("{}", render_psf(&details));
    }
    Ok(())
}

fn snapshot_accounting(args: &ReportArgs) -> Result<SnapshotAccounting<FrozenClock>, AppError> {
    let config = AppConfig::load()?;
    let window_length_in_days = args
        .sources
        .window_days
        .unwrap_or(config.payout_factor.window_length_in_days);
    let snapshot = LedgerSnapshot::load(
        args.sources.plans_csv.as_deref(),
        args.sources.transfers_csv.as_deref(),
    )?;
    let clock = FrozenClock::new(args.at.unwrap_or_else(Utc::now));
    Ok(SnapshotAccounting::new(snapshot, window_length_in_days, clock))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON snapshot unavailable: {}", err),
    }
}

pub(crate) fn render_payout_factor(details: &PayoutFactorDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Payout factor: {}", details.payout_factor.round_dp(2));
    let _ = writeln!(
        out,
        "Window: {} days, {} -> {} (centered on {})",
        details.window_size_in_days,
        details.window_start.format("%Y-%m-%d %H:%M"),
        details.window_end.format("%Y-%m-%d %H:%M"),
        details.window_center.format("%Y-%m-%d %H:%M"),
    );

    if details.plans.is_empty() {
        let _ = writeln!(out, "No approved plans in the window.");
        return out;
    }

    let _ = writeln!(out, "Plans considered ({}):", details.plans.len());
    for plan in &details.plans {
        let sector = if plan.is_public_service {
            "public"
        } else {
            "productive"
        };
        let _ = writeln!(
            out,
            "  - {} [{}] {} -> {} ({} days) | coverage {}",
            plan.name,
            sector,
            plan.approval_date.format("%Y-%m-%d"),
            plan.expiration_date.format("%Y-%m-%d"),
            plan.timeframe,
            plan.coverage.round_dp(2),
        );
    }
    out
}

pub(crate) fn render_psf(details: &PsfAccountDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Public sector fund balance: {}",
        details.account_balance.round_dp(2)
    );

    if details.transfers.is_empty() {
        let _ = writeln!(out, "No transfers touched the fund.");
        return out;
    }

    let _ = writeln!(out, "Transfers (newest first):");
    for transfer in &details.transfers {
        let _ = writeln!(
            out,
            "  - {} {:<18} {:>12}",
            transfer.date.format("%Y-%m-%d %H:%M"),
            transfer.transfer_type_label,
            transfer.volume.round_dp(2),
        );
    }
    out
}
