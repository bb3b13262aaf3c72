use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use parley_context::Mode;
use crate::{error::{ApiError, ApiResult}, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Send one message and get the assistant reply
///
/// POST /api/chat `{ sessionId, message, mode? }` → `{ reply }`
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ChatResponse>> {
    let req: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let (session_id, message) = match (non_empty(&req.session_id), non_empty(&req.message)) {
        (Some(session_id), Some(message)) => (session_id, message),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing sessionId or message".to_string(),
            ))
        }
    };

    let mode = Mode::from_tag(req.mode.as_deref());
    let reply = state.chat.reply(session_id, message, mode).await?;

    Ok(Json(ChatResponse { reply }))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
