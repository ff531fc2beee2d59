use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Local::now().format(modkit::TIMESTAMP_FORMAT).to_string()
    }))
}

/// Fallback for unknown routes; the error layer turns it into an envelope.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
