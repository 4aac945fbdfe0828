//! Generative-model refinement of the rule-based score.

mod advisor;
mod error;
mod gemini;
mod model;
mod prompt;


pub use advisor::{chat_cache_key, AiEnrichment, RefinedScore, ReputationAdvisor, CHAT_FALLBACK};
pub use error::{AiError, AiFailureKind};
pub use gemini::GeminiClient;
pub use model::{GenerativeModel, SamplingConfig};
