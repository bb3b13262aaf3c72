// Configuration layer for inference client creation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::traits::InferenceClient;
use crate::workers_ai::WorkersAiClient;

/// Configuration for the Cloudflare Workers AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    /// Base URL for the Cloudflare API (optional, defaults to https://api.cloudflare.com/client/v4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Factory for creating inference clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_client(config: WorkersAiConfig) -> Result<Arc<dyn InferenceClient>> {
        let mut builder = WorkersAiClient::builder()
            .account_id(config.account_id)
            .api_token(config.api_token);

        if let Some(base_url) = config.base_url {
            builder = builder.base_url(base_url);
        }

        Ok(Arc::new(builder.build()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workers_ai_config() {
        let config = WorkersAiConfig::new("acc-123", "token");
        assert_eq!(config.account_id, "acc-123");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_override_survives_serde() {
        let config = WorkersAiConfig::new("acc-123", "token")
            .with_base_url("http://localhost:8787");

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: WorkersAiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.base_url.as_deref(), Some("http://localhost:8787"));
    }

    #[test]
    fn test_factory_rejects_empty_account() {
        let result = ClientFactory::create_client(WorkersAiConfig::new("", "token"));
        assert!(result.is_err());
    }
}
