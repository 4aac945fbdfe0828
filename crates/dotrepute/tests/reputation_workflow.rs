//! End-to-end reputation scenarios driven through the public service facade
//! and HTTP router, with in-memory indexer and model doubles.

mod common {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use dotrepute::reputation::ai::{AiError, GenerativeModel, SamplingConfig};
    use dotrepute::reputation::cache::ManualClock;
    use dotrepute::reputation::indexer::{AccountRecord, StakingRecord};
    use dotrepute::reputation::{
        ChainIndexer, IndexerError, OnChainReader, ReputationAdvisor, ReputationService,
        RetryPolicy,
    };

    pub(super) const ADDRESS: &str = "14ShUZUYUR35RBZW6uVVt1zXDxmSQddkeDdXf1JkMA6P721N";

    pub(super) struct FixedIndexer {
        pub(super) account: Option<AccountRecord>,
    }

    #[async_trait]
    impl ChainIndexer for FixedIndexer {
        async fn fetch_account(&self, _: &str) -> Result<Option<AccountRecord>, IndexerError> {
            Ok(self.account.clone())
        }

        async fn fetch_staking(&self, _: &str) -> Result<Option<StakingRecord>, IndexerError> {
            Ok(Some(StakingRecord::default()))
        }
    }

    pub(super) struct EchoModel {
        pub(super) calls: AtomicU32,
    }

    #[async_trait]
    impl GenerativeModel for EchoModel {
        async fn generate(
            &self,
            prompt: &str,
            sampling: SamplingConfig,
        ) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if sampling == SamplingConfig::SCORING {
                return Ok(
                    "```json\n{\"analysis\":\"Council member with a modest stake.\",\"strengths\":[\"Council seat\"],\"improvements\":[],\"insights\":\"Vote more.\"}\n```"
                        .to_string(),
                );
            }
            let question = prompt
                .lines()
                .find_map(|line| line.strip_prefix("Question: "))
                .unwrap_or_default();
            Ok(format!("You asked {question}"))
        }
    }

    pub(super) fn council_account() -> AccountRecord {
        serde_json::from_value(serde_json::json!({
            "account_display": { "people": { "display": "Council Member" } },
            "judgements": [],
            "bonded": "50000000000",
            "count_extrinsic": 30,
            "democracy_lock": "10000000000",
            "is_council_member": true
        }))
        .expect("account record")
    }

    pub(super) fn build(
        account: Option<AccountRecord>,
    ) -> (
        Arc<ReputationService<FixedIndexer, EchoModel>>,
        Arc<EchoModel>,
        Arc<ManualClock>,
    ) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap(),
        ));
        let model = Arc::new(EchoModel {
            calls: AtomicU32::new(0),
        });
        let reader = OnChainReader::with_clock(Arc::new(FixedIndexer { account }), clock.clone());
        let advisor =
            ReputationAdvisor::with_components(model.clone(), RetryPolicy::default(), clock.clone());
        (
            Arc::new(ReputationService::with_reader(reader, advisor)),
            model,
            clock,
        )
    }
}

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::TimeDelta;
use dotrepute::config::AppEnvironment;
use dotrepute::reputation::snapshot::{
    ActivitySignals, GovernanceSignals, IdentitySignals, StakingSignals,
};
use dotrepute::reputation::{reputation_router, score, LevelTier, OnChainSnapshot, RankTier};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[test]
fn fully_engaged_snapshot_reaches_the_top_tier() {
    let snapshot = OnChainSnapshot {
        identity: IdentitySignals {
            has_identity: true,
            is_verified: true,
            judgement_count: 2,
        },
        governance: GovernanceSignals {
            vote_count: 25,
            ..GovernanceSignals::default()
        },
        staking: StakingSignals {
            total_staked: "1500000000000".to_string(),
            is_nominator: true,
            is_validator: false,
        },
        activity: ActivitySignals {
            transaction_count: 120,
            ..ActivitySignals::default()
        },
    };

    let result = score(&snapshot);

    assert_eq!(result.total_score, 100);
    assert_eq!(result.rank, RankTier::Top1);
    assert_eq!(result.level, LevelTier::Legend);
}

#[test]
fn snapshot_wire_format_round_trips_through_json() {
    let raw = json!({
        "identity": { "hasIdentity": true, "isVerified": false, "judgements": 0 },
        "governance": { "votesCount": 6, "proposalsCount": 0, "delegations": 0 },
        "staking": { "totalStaked": "abc", "isNominator": false, "isValidator": false },
        "activity": { "transactionCount": 11, "firstSeen": 0, "lastActive": 0 }
    });

    let snapshot: OnChainSnapshot = serde_json::from_value(raw.clone()).expect("parses");
    let result = score(&snapshot);

    assert_eq!(result.breakdown.identity, 10);
    assert_eq!(result.breakdown.governance, 20);
    assert_eq!(result.breakdown.staking, 0);
    assert_eq!(result.breakdown.activity, 10);
    assert_eq!(serde_json::to_value(&snapshot).unwrap(), raw);
}

#[tokio::test]
async fn council_member_assessment_uses_normalised_signals() {
    let (service, _, _) = build(Some(council_account()));

    let assessment = service.calculate(ADDRESS).await.expect("assessment");
    let score = assessment.score.score;

    // people display, 5 DOT bonded, 30 extrinsics, non-zero lock
    assert_eq!(score.breakdown.identity, 10);
    assert_eq!(score.breakdown.governance, 10);
    assert_eq!(score.breakdown.staking, 10);
    assert_eq!(score.breakdown.activity, 10);
    assert_eq!(score.total_score, 40);
    assert_eq!(score.level, LevelTier::Beginner);
    assert_eq!(assessment.on_chain_data.governance.delegation_count, 1);
    assert_eq!(assessment.score.enrichment.strengths, vec!["Council seat"]);
}

#[tokio::test]
async fn unknown_account_scores_zero_without_phantom_vote() {
    let (service, _, _) = build(None);

    let (snapshot, score) = service.baseline(ADDRESS).await;

    assert_eq!(snapshot.governance.vote_count, 0);
    assert!(snapshot.staking.is_nominator);
    assert_eq!(score.total_score, 0);
}

#[tokio::test]
async fn analysis_is_reused_within_ttl_and_refreshed_after() {
    let (service, model, clock) = build(Some(council_account()));

    service.calculate(ADDRESS).await.expect("first");
    clock.advance(TimeDelta::seconds(299));
    service.calculate(ADDRESS).await.expect("cached");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);

    clock.advance(TimeDelta::seconds(1));
    service.calculate(ADDRESS).await.expect("refreshed");
    assert_eq!(model.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn chat_over_http_answers_and_caches_per_question() {
    let (service, model, _) = build(Some(council_account()));
    let router = reputation_router(service, AppEnvironment::Development);

    let ask = |query: &str| {
        Request::post("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&json!({ "address": ADDRESS, "query": query })).unwrap(),
            ))
            .unwrap()
    };

    let response = router.clone().oneshot(ask("How am I doing?")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["response"], "You asked \"How am I doing?\"");
    assert_eq!(body["onChainData"]["score"], 40);
    assert_eq!(body["onChainData"]["level"], "Beginner");
    assert_eq!(body["onChainData"]["governance"]["delegations"], 1);

    router.clone().oneshot(ask("How am I doing?")).await.unwrap();
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);

    router.oneshot(ask("What next?")).await.unwrap();
    assert_eq!(model.calls.load(Ordering::SeqCst), 2);
}
