use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for single-shot text generation
///
/// One prompt in, one completion out. Implementations must not retry on
/// their own; any failure is returned to the caller unchanged.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run the model on a prompt and wait for the full response
    async fn run(&self, request: InferenceRequest) -> Result<InferenceOutput>;
}

#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt: String,
    pub options: InferenceOptions,
}

impl InferenceRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: InferenceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl InferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

#[derive(Debug, Clone)]
pub struct InferenceOutput {
    /// Generated text
    pub response: String,
    pub usage: Option<TokenUsage>,
    pub raw: serde_json::Value,
}

impl InferenceOutput {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            usage: None,
            raw: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
