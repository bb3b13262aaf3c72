use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Persist(#[from] parley_persist::PersistError),

    #[error("Inference error: {0:#}")]
    Inference(#[from] anyhow::Error),

    #[error("Request timed out")]
    Timeout,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Inference(ref e) => {
                tracing::error!("Inference error: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Timeout => {
                tracing::error!("Request exceeded the configured timeout");
                StatusCode::REQUEST_TIMEOUT
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
