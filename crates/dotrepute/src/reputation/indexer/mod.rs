//! On-chain data acquisition: indexer client plus normalisation into
//! [`OnChainSnapshot`].

mod normalize;
mod records;
mod subscan;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

pub use normalize::normalize;
pub use records::{AccountDisplay, AccountRecord, PeopleDisplay, StakingRecord};
pub use subscan::SubscanClient;

use super::cache::{Clock, SystemClock};
use super::snapshot::OnChainSnapshot;

/// Block-explorer lookups keyed by SS58 address.
#[async_trait]
pub trait ChainIndexer: Send + Sync {
    async fn fetch_account(&self, address: &str) -> Result<Option<AccountRecord>, IndexerError>;
    async fn fetch_staking(&self, address: &str) -> Result<Option<StakingRecord>, IndexerError>;
}

/// Indexer failure. Never escapes [`OnChainReader`].
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("indexer transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("indexer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("indexer error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("indexer payload could not be decoded: {0}")]
    Decode(String),
}

/// Builds snapshots from an indexer, degrading to zero-filled signals when a
/// lookup fails.
pub struct OnChainReader<I> {
    indexer: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<I> OnChainReader<I>
where
    I: ChainIndexer + 'static,
{
    pub fn new(indexer: Arc<I>) -> Self {
        Self::with_clock(indexer, Arc::new(SystemClock))
    }

    pub fn with_clock(indexer: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self { indexer, clock }
    }

    pub async fn snapshot(&self, address: &str) -> OnChainSnapshot {
        info!(address, "fetching on-chain data");
        let (account, staking) = tokio::join!(
            self.indexer.fetch_account(address),
            self.indexer.fetch_staking(address),
        );

        let account = account.unwrap_or_else(|err| {
            warn!(address, error = %err, "account lookup failed");
            None
        });
        let staking = staking.unwrap_or_else(|err| {
            warn!(address, error = %err, "staking lookup failed");
            None
        });

        normalize(
            account.as_ref(),
            staking.as_ref(),
            self.clock.now().timestamp_millis(),
        )
    }
}
