use crate::cli::ServeArgs;
use crate::infra::{build_service, cors_layer, AppState};
use crate::routes::with_reputation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dotrepute::config::AppConfig;
use dotrepute::error::AppError;
use dotrepute::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.ai.api_key.is_some() {
        info!(model = %config.ai.model, "AI credential loaded");
    } else {
        warn!("GEMINI_API_KEY not set; AI scoring and chat will fail");
    }
    if config.indexer.api_key.is_none() {
        warn!("SUBSCAN_API_KEY not set; indexer calls may be rate limited");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_service(&config);

    let app = with_reputation_routes(service, config.environment)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(cors_layer(&config.server.allowed_origins));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "DotRepute API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
