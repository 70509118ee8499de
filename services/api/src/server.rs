use crate::cli::ServeArgs;
use crate::infra::{AppState, LedgerSnapshot, SnapshotAccounting};
use crate::routes::accounting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use workers_control::accounting::SystemClock;
use workers_control::config::AppConfig;
use workers_control::error::AppError;
use workers_control::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(days) = args.sources.window_days {
        config.payout_factor.window_length_in_days = days;
    }

    telemetry::init(&config.telemetry)?;

    let snapshot = LedgerSnapshot::load(
        args.sources.plans_csv.as_deref(),
        args.sources.transfers_csv.as_deref(),
    )?;
    let accounting = Arc::new(SnapshotAccounting::new(
        snapshot,
        config.payout_factor.window_length_in_days,
        SystemClock,
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        accounting,
    };

    let app = accounting_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        window_days = config.payout_factor.window_length_in_days,
        "workers control accounting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
