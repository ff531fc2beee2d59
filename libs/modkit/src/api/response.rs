use axum::http::StatusCode;
use serde::Serialize;

use crate::api::envelope::SuccessEnvelope;

/// 200 OK envelope
pub fn ok<T: Serialize>(message: &str, data: T) -> SuccessEnvelope<T> {
    SuccessEnvelope::new(StatusCode::OK, message, data)
}

/// 201 Created envelope
pub fn created<T: Serialize>(message: &str, data: T) -> SuccessEnvelope<T> {
    SuccessEnvelope::new(StatusCode::CREATED, message, data)
}

/// 200 OK envelope with `data: null`
pub fn ok_empty(message: &str) -> SuccessEnvelope<()> {
    SuccessEnvelope::without_data(StatusCode::OK, message)
}
