use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};
use crate::store::KvStore;

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareKvConfig {
    pub account_id: String,
    pub api_token: String,
    pub namespace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Workers KV namespace accessed through the Cloudflare REST API
///
/// Values live at `{base}/accounts/{account}/storage/kv/namespaces/{ns}/values/{key}`.
/// KV is eventually consistent, so a read right after a write from another
/// region may still see the previous value.
#[derive(Debug)]
pub struct CloudflareKvStore {
    http_client: reqwest::Client,
    base_url: Url,
    account_id: String,
    namespace_id: String,
}

impl CloudflareKvStore {
    pub fn new(config: CloudflareKvConfig) -> Result<Self> {
        if config.namespace_id.is_empty() {
            return Err(PersistError::Connection("KV namespace id is required".to_string()));
        }

        let base = config.base_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        let base_url = Url::parse(base)
            .map_err(|e| PersistError::Connection(format!("Invalid API base `{}`: {}", base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| PersistError::Connection("Invalid API token format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            account_id: config.account_id,
            namespace_id: config.namespace_id,
        })
    }

    /// The key becomes a single path segment, so `/` and friends are percent-encoded
    fn value_url(&self, key: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PersistError::InvalidKey(key.to_string()))?
            .pop_if_empty()
            .extend([
                "accounts",
                self.account_id.as_str(),
                "storage",
                "kv",
                "namespaces",
                self.namespace_id.as_str(),
                "values",
                key,
            ]);
        Ok(url)
    }
}

#[async_trait]
impl KvStore for CloudflareKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let response = self.http_client.get(self.value_url(key)?).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(PersistError::Store {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let response = self
            .http_client
            .put(self.value_url(key)?)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(value)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PersistError::Store {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
