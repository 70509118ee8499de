use crate::report::{run_payout_factor_report, run_psf_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workers_control::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workers Control",
    about = "Serve and inspect the payout factor and public sector fund of a ledger snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the current payout factor and the plans it was computed from
    PayoutFactor(ReportArgs),
    /// Print the public sector fund balance and its transfers
    Psf(ReportArgs),
}

/// Where the ledger snapshot comes from and how wide the window is.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SnapshotSources {
    /// Plans CSV export (id,name,approval_date,timeframe_days,is_public_service,means_cost,resource_cost,labour_cost)
    #[arg(long)]
    pub(crate) plans_csv: Option<PathBuf>,
    /// Transfers CSV export (date,type,debit_account,credit_account,value)
    #[arg(long)]
    pub(crate) transfers_csv: Option<PathBuf>,
    /// Override the configured gliding window length in days
    #[arg(long, value_parser = crate::infra::parse_window_days)]
    pub(crate) window_days: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) sources: SnapshotSources,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::PayoutFactor(args) => run_payout_factor_report(args),
        Command::Psf(args) => run_psf_report(args),
    }
}
