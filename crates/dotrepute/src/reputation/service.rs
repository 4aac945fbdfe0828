use std::sync::Arc;

use serde::Serialize;

use super::ai::{AiError, GenerativeModel, RefinedScore, ReputationAdvisor};
use super::indexer::{ChainIndexer, OnChainReader};
use super::scoring::{self, ScoreBreakdown};
use super::snapshot::OnChainSnapshot;

/// Snapshot plus the refined score computed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub score: RefinedScore,
    pub on_chain_data: OnChainSnapshot,
}

/// Chat answer with the snapshot and rule-based score it was grounded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    pub snapshot: OnChainSnapshot,
    pub score: ScoreBreakdown,
}

/// Service composing the on-chain reader, the rubric and the AI advisor.
pub struct ReputationService<I, M> {
    reader: OnChainReader<I>,
    advisor: ReputationAdvisor<M>,
}

impl<I, M> ReputationService<I, M>
where
    I: ChainIndexer + 'static,
    M: GenerativeModel + 'static,
{
    pub fn new(indexer: Arc<I>, advisor: ReputationAdvisor<M>) -> Self {
        Self::with_reader(OnChainReader::new(indexer), advisor)
    }

    pub fn with_reader(reader: OnChainReader<I>, advisor: ReputationAdvisor<M>) -> Self {
        Self { reader, advisor }
    }

    /// Normalized on-chain signals for `address`. Never fails; unreachable
    /// sources zero-fill.
    pub async fn on_chain_data(&self, address: &str) -> OnChainSnapshot {
        self.reader.snapshot(address).await
    }

    /// Rule-based score without touching the model.
    pub async fn baseline(&self, address: &str) -> (OnChainSnapshot, ScoreBreakdown) {
        let snapshot = self.on_chain_data(address).await;
        let score = scoring::score(&snapshot);
        (snapshot, score)
    }

    pub async fn calculate(&self, address: &str) -> Result<Assessment, AiError> {
        let snapshot = self.on_chain_data(address).await;
        let score = self.advisor.refine_score(address, &snapshot).await?;
        Ok(Assessment {
            score,
            on_chain_data: snapshot,
        })
    }

    pub async fn chat(&self, address: &str, query: &str) -> Result<ChatReply, AiError> {
        let snapshot = self.on_chain_data(address).await;
        let answer = self.advisor.answer_query(address, query, &snapshot).await?;
        let score = scoring::score(&snapshot);
        Ok(ChatReply {
            answer,
            snapshot,
            score,
        })
    }
}
