use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Service identity reported by the liveness endpoint. Deploy probes and the
/// upstream gateway match on this string.
pub const SERVICE_NAME: &str = "python-ai";

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}
