use crate::infra::{AppState, PayoutFactorSummary};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use workers_control::accounting::details::{
    PayoutFactorDetails, PayoutFactorWindowDetails, PsfAccountDetails,
};
use workers_control::error::AppError;

pub(crate) fn accounting_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/payout-factor", get(payout_factor_endpoint))
        .route(
            "/api/v1/payout-factor/details",
            get(payout_factor_details_endpoint),
        )
        .route(
            "/api/v1/payout-factor/window",
            get(payout_factor_window_endpoint),
        )
        .route("/api/v1/psf", get(psf_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn payout_factor_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<PayoutFactorSummary>, AppError> {
    Ok(Json(state.accounting.payout_factor()?))
}

pub(crate) async fn payout_factor_details_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<PayoutFactorDetails>, AppError> {
    Ok(Json(state.accounting.payout_factor_details()?))
}

pub(crate) async fn payout_factor_window_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<PayoutFactorWindowDetails>, AppError> {
    Ok(Json(state.accounting.payout_factor_window()?))
}

pub(crate) async fn psf_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<PsfAccountDetails>, AppError> {
    Ok(Json(state.accounting.psf_details()?))
}
