use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use dotrepute::config::AppEnvironment;
use dotrepute::reputation::{reputation_router, ChainIndexer, GenerativeModel, ReputationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) const SERVICE_NAME: &str = "DotRepute Backend API";

pub(crate) fn with_reputation_routes<I, M>(
    service: Arc<ReputationService<I, M>>,
    environment: AppEnvironment,
) -> axum::Router
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    reputation_router(service, environment)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "service": SERVICE_NAME,
    }))
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
