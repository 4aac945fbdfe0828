use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::ai::{AiError, GenerativeModel};
use super::indexer::ChainIndexer;
use super::scoring::{CategoryPoints, LevelTier, RankTier};
use super::service::{ChatReply, ReputationService};
use super::snapshot::OnChainSnapshot;
use crate::config::AppEnvironment;

/// Router builder exposing the reputation and chat endpoints.
pub fn reputation_router<I, M>(
    service: Arc<ReputationService<I, M>>,
    environment: AppEnvironment,
) -> Router
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    Router::new()
        .route("/api/reputation/calculate", post(calculate_handler::<I, M>))
        .route("/api/reputation/{address}", get(on_chain_handler::<I, M>))
        .route("/api/chat", post(chat_handler::<I, M>))
        .with_state(ReputationState {
            service,
            environment,
        })
}

pub(crate) struct ReputationState<I, M> {
    service: Arc<ReputationService<I, M>>,
    environment: AppEnvironment,
}

impl<I, M> Clone for ReputationState<I, M> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            environment: self.environment,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CalculateRequest {
    address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChatRequest {
    address: Option<String>,
    query: Option<String>,
}

/// Chat responses carry the snapshot with the rule-based score merged in.
#[derive(Debug, Serialize)]
struct ScoredSnapshot<'a> {
    #[serde(flatten)]
    snapshot: &'a OnChainSnapshot,
    score: u8,
    breakdown: CategoryPoints,
    rank: RankTier,
    level: LevelTier,
}

impl<'a> From<&'a ChatReply> for ScoredSnapshot<'a> {
    fn from(reply: &'a ChatReply) -> Self {
        Self {
            snapshot: &reply.snapshot,
            score: reply.score.total_score,
            breakdown: reply.score.breakdown,
            rank: reply.score.rank,
            level: reply.score.level,
        }
    }
}

/// Request-level failures rendered as `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl ApiError {
    fn into_response_for(self, environment: AppEnvironment) -> Response {
        match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Ai(error) => {
                let mut payload = json!({ "error": error.user_message() });
                if environment.exposes_error_detail() {
                    payload["detail"] = json!(error.to_string());
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
            }
        }
    }
}

fn required(value: Option<String>, message: &'static str) -> Result<String, ApiError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or(ApiError::Validation(message))
}

/// Unreadable bodies are treated as `{}` so the field checks answer with
/// `{ "error": ... }` instead of the extractor's plain-text rejection.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(
                status = %rejection.status(),
                reason = %rejection.body_text(),
                "unreadable request body"
            );
            T::default()
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) async fn calculate_handler<I, M>(
    State(state): State<ReputationState<I, M>>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    let request = body_or_default(body);
    let result = async {
        let address = required(request.address, "Wallet address is required")?;
        info!(address = %address, "calculating reputation");
        let assessment = state.service.calculate(&address).await?;
        Ok::<_, ApiError>(json!({
            "success": true,
            "address": address,
            "score": assessment.score,
            "onChainData": assessment.on_chain_data,
            "timestamp": timestamp(),
        }))
    }
    .await;

    match result {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => error.into_response_for(state.environment),
    }
}

pub(crate) async fn on_chain_handler<I, M>(
    State(state): State<ReputationState<I, M>>,
    Path(address): Path<String>,
) -> Response
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    info!(address = %address, "reading on-chain data");
    let snapshot = state.service.on_chain_data(&address).await;
    let payload = json!({
        "success": true,
        "address": address,
        "data": snapshot,
        "timestamp": timestamp(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn chat_handler<I, M>(
    State(state): State<ReputationState<I, M>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    let request = body_or_default(body);
    let result = async {
        let address = required(request.address, "Wallet address is required")?;
        let query = required(request.query, "Query is required")?;
        info!(address = %address, query = %query, "answering chat query");
        let reply = state.service.chat(&address, &query).await?;
        Ok::<_, ApiError>(json!({
            "success": true,
            "address": address,
            "query": query,
            "response": reply.answer.as_str(),
            "onChainData": ScoredSnapshot::from(&reply),
            "timestamp": timestamp(),
        }))
    }
    .await;

    match result {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => error.into_response_for(state.environment),
    }
}
