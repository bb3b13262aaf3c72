use std::sync::Arc;

use parley_context::{build_prompt, context_window, Mode, CONTEXT_WINDOW_TURNS};
use parley_llm::{InferenceClient, InferenceOptions, InferenceRequest};
use parley_persist::{HistoryRepository, Turn};

use crate::error::{ApiError, ApiResult};

/// Model every chat turn runs on
pub const INFERENCE_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";
pub const MAX_OUTPUT_TOKENS: u32 = 120;
pub const TEMPERATURE: f32 = 0.25;

/// One chat exchange: load history, ask the model, store the new turns
///
/// Requests for the same session are not serialized. Two overlapping turns
/// both read the same history and the later `save` wins, dropping the other
/// exchange.
#[derive(Clone)]
pub struct ChatService {
    history: HistoryRepository,
    inference: Arc<dyn InferenceClient>,
    reset_on_corrupt: bool,
}

impl ChatService {
    pub fn new(history: HistoryRepository, inference: Arc<dyn InferenceClient>) -> Self {
        Self {
            history,
            inference,
            reset_on_corrupt: false,
        }
    }

    pub fn reset_on_corrupt(mut self, reset: bool) -> Self {
        self.reset_on_corrupt = reset;
        self
    }

    /// Produce the assistant reply for `message` and persist both turns
    ///
    /// Nothing is written unless inference succeeds.
    pub async fn reply(&self, session_id: &str, message: &str, mode: Mode) -> ApiResult<String> {
        let mut history = match self.history.load(session_id).await {
            Ok(history) => history,
            Err(e) if e.is_history_corrupt() && self.reset_on_corrupt => {
                tracing::warn!(session_id, error = %e, "Discarding corrupt history");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        history.push(Turn::user(message));

        let window = context_window(&history, CONTEXT_WINDOW_TURNS);
        let prompt = build_prompt(window, mode);

        tracing::debug!(
            session_id,
            mode = %mode,
            history_len = history.len(),
            window_len = window.len(),
            "Running inference"
        );

        let request = InferenceRequest::new(INFERENCE_MODEL, prompt).with_options(
            InferenceOptions::new()
                .max_tokens(MAX_OUTPUT_TOKENS)
                .temperature(TEMPERATURE),
        );

        let output = self.inference.run(request).await.map_err(ApiError::Inference)?;
        let reply = output.response;

        history.push(Turn::assistant(reply.clone()));

        let stored = self.history.save(session_id, history).await?;
        tracing::debug!(session_id, stored, "History saved");

        Ok(reply)
    }
}
