use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::config::AppEnvironment;
use crate::reputation::ai::{AiError, GenerativeModel, ReputationAdvisor, SamplingConfig};
use crate::reputation::cache::ManualClock;
use crate::reputation::indexer::{
    AccountRecord, ChainIndexer, IndexerError, OnChainReader, StakingRecord,
};
use crate::reputation::retry::RetryPolicy;
use crate::reputation::{reputation_router, ReputationService};

pub(super) const ADDRESS: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

pub(super) const ASSESSMENT_JSON: &str = r#"{
  "totalScore": 100,
  "analysis": "Well-rounded participant.",
  "strengths": ["Verified identity"],
  "improvements": ["Submit a proposal"],
  "insights": "Keep it up."
}"#;

/// Verified, 150 DOT bonded, 120 extrinsics, no democracy lock: 70 points.
pub(super) fn engaged_account() -> AccountRecord {
    serde_json::from_value(serde_json::json!({
        "display": "alice",
        "judgements": [ { "index": 0, "judgement": "Reasonable" } ],
        "bonded": "1500000000000",
        "count_extrinsic": 120,
        "democracy_lock": "0"
    }))
    .expect("valid account record")
}

#[derive(Default)]
pub(super) struct MemoryIndexer {
    pub(super) account: Option<AccountRecord>,
    pub(super) staking: Option<StakingRecord>,
    pub(super) unavailable: bool,
    lookups: AtomicU32,
}

impl MemoryIndexer {
    pub(super) fn with_account(account: AccountRecord) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }

    pub(super) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(super) fn lookups(&self) -> u32 {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), IndexerError> {
        if self.unavailable {
            return Err(IndexerError::Status {
                status: 503,
                body: "maintenance".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChainIndexer for MemoryIndexer {
    async fn fetch_account(&self, _address: &str) -> Result<Option<AccountRecord>, IndexerError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.account.clone())
    }

    async fn fetch_staking(&self, _address: &str) -> Result<Option<StakingRecord>, IndexerError> {
        self.check()?;
        Ok(self.staking.clone())
    }
}

/// Model returning one fixed outcome and recording the prompts it saw.
pub(super) struct CannedModel {
    outcome: Result<String, AiError>,
    calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub(super) fn replying(text: &str) -> Self {
        Self::new(Ok(text.to_string()))
    }

    pub(super) fn failing(error: AiError) -> Self {
        Self::new(Err(error))
    }

    fn new(outcome: Result<String, AiError>) -> Self {
        Self {
            outcome,
            calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeModel for CannedModel {
    async fn generate(&self, prompt: &str, _sampling: SamplingConfig) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.clone()
    }
}

pub(super) type TestService = ReputationService<MemoryIndexer, CannedModel>;

pub(super) fn build_service(
    indexer: MemoryIndexer,
    model: CannedModel,
) -> (Arc<TestService>, Arc<MemoryIndexer>, Arc<CannedModel>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap(),
    ));
    let indexer = Arc::new(indexer);
    let model = Arc::new(model);

    let reader = OnChainReader::with_clock(indexer.clone(), clock.clone());
    let advisor = ReputationAdvisor::with_components(model.clone(), RetryPolicy::default(), clock);
    let service = Arc::new(ReputationService::with_reader(reader, advisor));
    (service, indexer, model)
}

pub(super) fn router_for(service: Arc<TestService>, environment: AppEnvironment) -> axum::Router {
    reputation_router(service, environment)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
