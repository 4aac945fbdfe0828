use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::error::AiError;
use super::model::{GenerativeModel, SamplingConfig};
use super::prompt::{chat_prompt, scoring_prompt, strip_code_fence};
use crate::reputation::cache::{Clock, ResponseCache, SystemClock, DEFAULT_TTL};
use crate::reputation::retry::RetryPolicy;
use crate::reputation::scoring::{self, ScoreBreakdown};
use crate::reputation::snapshot::OnChainSnapshot;

/// Returned when the model answers a chat question with nothing.
pub const CHAT_FALLBACK: &str = "Sorry, I can't answer this question right now.";

/// Narrative fields contributed by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiEnrichment {
    pub analysis: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub insights: String,
}

/// Rule-based score with the model's narrative attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedScore {
    #[serde(flatten)]
    pub score: ScoreBreakdown,
    #[serde(flatten)]
    pub enrichment: AiEnrichment,
}

/// Shape the model is asked to return. Numbers are only used to detect drift
/// from the rubric; missing narrative fields default to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelAssessment {
    #[serde(default)]
    total_score: Option<f64>,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    insights: String,
}

pub fn chat_cache_key(address: &str, query: &str) -> String {
    format!("{address}:{query}")
}

/// AI refinement layer: response caching, bounded retries and a per-attempt
/// deadline around a [`GenerativeModel`].
pub struct ReputationAdvisor<M> {
    model: Arc<M>,
    scores: ResponseCache<RefinedScore>,
    answers: ResponseCache<String>,
    policy: RetryPolicy,
    language: String,
}

impl<M> ReputationAdvisor<M>
where
    M: GenerativeModel + 'static,
{
    pub fn new(model: Arc<M>) -> Self {
        Self::with_components(model, RetryPolicy::default(), Arc::new(SystemClock))
    }

    pub fn with_components(model: Arc<M>, policy: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            model,
            scores: ResponseCache::with_clock(DEFAULT_TTL, clock.clone()),
            answers: ResponseCache::with_clock(DEFAULT_TTL, clock),
            policy,
            language: "English".to_string(),
        }
    }

    /// Language the model writes narrative fields and answers in.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Scores `snapshot` and asks the model for narrative analysis. Cached per
    /// address for the cache TTL.
    pub async fn refine_score(
        &self,
        address: &str,
        snapshot: &OnChainSnapshot,
    ) -> Result<RefinedScore, AiError> {
        if let Some(cached) = self.scores.get(address) {
            return Ok(cached);
        }

        info!(address, "requesting AI reputation analysis");
        let baseline = scoring::score(snapshot);
        let prompt = scoring_prompt(address, snapshot, &self.language);
        let prompt = prompt.as_str();
        let model = self.model.as_ref();

        let enrichment = self
            .policy
            .execute(
                move |_| async move {
                    let text = model.generate(prompt, SamplingConfig::SCORING).await?;
                    parse_assessment(&text, &baseline)
                },
                AiError::is_retryable,
            )
            .await
            .inspect_err(|err| error!(address, error = %err, "AI reputation analysis failed"))?;

        let refined = RefinedScore {
            score: baseline,
            enrichment,
        };
        self.scores.insert(address, refined.clone());
        Ok(refined)
    }

    /// Free-form answer to `query` grounded in `snapshot`. Cached per
    /// address and exact query text. An empty reply yields [`CHAT_FALLBACK`],
    /// which is not cached so the next ask reaches the model again.
    pub async fn answer_query(
        &self,
        address: &str,
        query: &str,
        snapshot: &OnChainSnapshot,
    ) -> Result<String, AiError> {
        let key = chat_cache_key(address, query);
        if let Some(cached) = self.answers.get(&key) {
            return Ok(cached);
        }

        info!(address, query, "requesting AI chat answer");
        let prompt = chat_prompt(address, query, snapshot, &self.language);
        let prompt = prompt.as_str();
        let model = self.model.as_ref();

        let answer = self
            .policy
            .execute(
                move |_| async move { model.generate(prompt, SamplingConfig::CHAT).await },
                AiError::is_retryable,
            )
            .await
            .inspect_err(|err| error!(address, error = %err, "AI chat failed"))?;

        let answer = answer.trim();
        if answer.is_empty() {
            warn!(address, "model returned an empty answer, using fallback");
            return Ok(CHAT_FALLBACK.to_string());
        }

        self.answers.insert(key, answer.to_string());
        Ok(answer.to_string())
    }
}

fn parse_assessment(text: &str, baseline: &ScoreBreakdown) -> Result<AiEnrichment, AiError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AiError::MalformedResponse("empty response".to_string()));
    }

    let assessment: ModelAssessment = serde_json::from_str(body)
        .map_err(|err| AiError::MalformedResponse(err.to_string()))?;

    if let Some(reported) = assessment.total_score {
        if (reported - f64::from(baseline.total_score)).abs() > f64::EPSILON {
            warn!(
                reported,
                expected = baseline.total_score,
                "model score drifted from rubric, keeping rule-based score"
            );
        }
    }

    Ok(AiEnrichment {
        analysis: assessment.analysis,
        strengths: assessment.strengths,
        improvements: assessment.improvements,
        insights: assessment.insights,
    })
}
