use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::records::{AccountRecord, Envelope, SearchData, StakingRecord};
use super::{ChainIndexer, IndexerError};
use crate::config::IndexerConfig;

/// Subscan REST client for the Polkadot relay chain.
#[derive(Clone)]
pub struct SubscanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SubscanClient {
    pub fn new(config: &IndexerConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("dotrepute/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Option<T>, IndexerError> {
        let mut request = self.http.post(format!("{}{path}", self.base_url)).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|err| IndexerError::Decode(err.to_string()))?;
        if envelope.code != 0 {
            return Err(IndexerError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        Ok(envelope.data)
    }
}

impl std::fmt::Debug for SubscanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscanClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl ChainIndexer for SubscanClient {
    async fn fetch_account(&self, address: &str) -> Result<Option<AccountRecord>, IndexerError> {
        let data: Option<SearchData> = self
            .post("/api/v2/scan/search", json!({ "key": address }))
            .await?;
        Ok(data.and_then(|search| search.account))
    }

    async fn fetch_staking(&self, address: &str) -> Result<Option<StakingRecord>, IndexerError> {
        self.post("/api/scan/staking/nominator", json!({ "address": address }))
            .await
    }
}
