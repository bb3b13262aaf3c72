use axum::http::StatusCode;

/// Any path or method without a route
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
