mod cli;
mod infra;
mod report;
mod routes;
mod server;

use workers_control::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
