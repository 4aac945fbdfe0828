use axum::http::{HeaderValue, Method};
use dotrepute::config::AppConfig;
use dotrepute::reputation::{
    GeminiClient, ReputationAdvisor, ReputationService, RetryPolicy, SubscanClient, SystemClock,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LiveService = ReputationService<SubscanClient, GeminiClient>;

/// Wires the Subscan indexer and Gemini model into the reputation service.
pub(crate) fn build_service(config: &AppConfig) -> Arc<LiveService> {
    let indexer = Arc::new(SubscanClient::new(&config.indexer));
    let model = Arc::new(GeminiClient::new(&config.ai));
    let policy = RetryPolicy::default().with_attempt_timeout(config.ai.request_timeout);
    let advisor = ReputationAdvisor::with_components(model, policy, Arc::new(SystemClock))
        .with_language(config.ai.response_language.clone());

    Arc::new(ReputationService::new(indexer, advisor))
}

/// CORS for the configured browser origins, with credentials.
pub(crate) fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
        .allow_credentials(true)
}
