//! Wallet reputation: on-chain signal acquisition, the rule-based rubric and
//! the AI refinement layer, exposed over HTTP.

pub mod ai;
pub mod cache;
pub mod indexer;
pub mod retry;
pub mod router;
pub mod scoring;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use ai::{AiError, GeminiClient, GenerativeModel, RefinedScore, ReputationAdvisor};
pub use cache::{Clock, ResponseCache, SystemClock};
pub use indexer::{ChainIndexer, IndexerError, OnChainReader, SubscanClient};
pub use retry::RetryPolicy;
pub use router::{reputation_router, ApiError};
pub use scoring::{score, CategoryPoints, LevelTier, RankTier, ScoreBreakdown};
pub use service::{Assessment, ChatReply, ReputationService};
pub use snapshot::OnChainSnapshot;
