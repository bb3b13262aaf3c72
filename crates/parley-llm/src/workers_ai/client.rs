// Cloudflare Workers AI client implementation

use crate::traits::{InferenceClient, InferenceOutput, InferenceRequest, TokenUsage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Workers AI client (REST API direct, no bindings)
///
/// - URL: {base}/accounts/{account_id}/ai/run/{model}
/// - Auth header: Authorization: Bearer {api_token}
/// - The model identifier is passed per request, e.g. `@cf/meta/llama-3.3-70b-instruct-fp8-fast`
#[derive(Debug)]
pub struct WorkersAiClient {
    http_client: reqwest::Client,
    base_url: String,
    account_id: String,
}

impl WorkersAiClient {
    pub fn builder() -> WorkersAiClientBuilder {
        WorkersAiClientBuilder::default()
    }

    fn run_url(&self, model: &str) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.base_url, self.account_id, model)
    }

    /// Build text-generation payload
    fn build_run_request(&self, request: &InferenceRequest) -> Value {
        let mut payload = serde_json::json!({
            "prompt": request.prompt,
        });

        if let Some(obj) = payload.as_object_mut() {
            if let Some(max_tokens) = request.options.max_tokens {
                obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
            }
            if let Some(temperature) = request.options.temperature {
                obj.insert("temperature".to_string(), serde_json::json!(temperature));
            }
        }

        payload
    }
}

#[async_trait]
impl InferenceClient for WorkersAiClient {
    async fn run(&self, request: InferenceRequest) -> Result<InferenceOutput> {
        let payload = self.build_run_request(&request);

        tracing::debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            "Running Workers AI model"
        );

        let response = self
            .http_client
            .post(self.run_url(&request.model))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Workers AI error ({}): {}", status, error_text);
        }

        let raw: Value = response
            .json()
            .await
            .context("Failed to parse response")?;

        let envelope: RunEnvelope = serde_json::from_value(raw.clone())
            .context("Unexpected Workers AI response shape")?;

        if !envelope.success {
            let messages = envelope
                .errors
                .iter()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .collect::<Vec<_>>()
                .join("; ");
            anyhow::bail!("Workers AI reported failure: {}", messages);
        }

        let result = envelope
            .result
            .context("Workers AI response has no result")?;
        let text = result
            .response
            .context("Workers AI result has no `response` field")?;

        Ok(InferenceOutput {
            response: text,
            usage: result.usage,
            raw,
        })
    }
}

#[derive(Default)]
pub struct WorkersAiClientBuilder {
    account_id: Option<String>,
    api_token: Option<String>,
    base_url: Option<String>,
}

impl WorkersAiClientBuilder {
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Override the API base (tests, local gateways)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<WorkersAiClient> {
        let account_id = self
            .account_id
            .filter(|s| !s.is_empty())
            .context("Account ID is required")?;
        let api_token = self
            .api_token
            .filter(|s| !s.is_empty())
            .context("API token is required")?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_token))
                .context("Invalid API token format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(WorkersAiClient {
            http_client,
            base_url,
            account_id,
        })
    }
}

// ============================================================================
// WORKERS AI RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunResult {
    response: Option<String>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InferenceOptions;

    fn client() -> WorkersAiClient {
        WorkersAiClient::builder()
            .account_id("acc")
            .api_token("token")
            .base_url("http://localhost:9999/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let url = client().run_url("@cf/meta/llama");
        assert_eq!(url, "http://localhost:9999/accounts/acc/ai/run/@cf/meta/llama");
    }

    #[test]
    fn test_payload_omits_unset_options() {
        let request = InferenceRequest::new("m", "hello");
        let payload = client().build_run_request(&request);
        assert_eq!(payload, serde_json::json!({ "prompt": "hello" }));
    }

    #[test]
    fn test_payload_includes_sampling_options() {
        let request = InferenceRequest::new("m", "hello")
            .with_options(InferenceOptions::new().max_tokens(120).temperature(0.25));
        let payload = client().build_run_request(&request);

        assert_eq!(payload["max_tokens"], 120);
        assert_eq!(payload["temperature"].as_f64(), Some(0.25));
    }
}
