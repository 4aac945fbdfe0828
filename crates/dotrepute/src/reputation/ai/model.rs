use async_trait::async_trait;
use serde::Serialize;

use super::error::AiError;

/// Decoding parameters forwarded to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl SamplingConfig {
    /// Near-deterministic decoding for rubric reproduction.
    pub const SCORING: SamplingConfig = SamplingConfig {
        temperature: 0.1,
        top_p: 0.8,
        top_k: 10,
    };

    /// Slightly wider nucleus for conversational answers.
    pub const CHAT: SamplingConfig = SamplingConfig {
        temperature: 0.1,
        top_p: 0.9,
        top_k: 40,
    };
}

/// Text generation backend. Implementations map transport and HTTP failures
/// onto [`AiError`] so the retry policy can classify them.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str, sampling: SamplingConfig) -> Result<String, AiError>;
}
