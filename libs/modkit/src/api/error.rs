use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::envelope::ErrorEnvelope;

/// Unified API error returned by handlers.
///
/// Carries the HTTP status and the message shown to the caller. The request
/// path is not known here, so the rendered body leaves it empty and
/// [`error_mapping_middleware`](crate::api::error_layer::error_mapping_middleware)
/// fills it in.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render as an error envelope for the given request path.
    pub fn to_envelope(&self, path: impl Into<String>) -> ErrorEnvelope {
        ErrorEnvelope::new(self.status, self.message.clone(), path)
    }
}

/// Errors without an explicit status are server errors; details stay in the logs.
impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!(error = %format!("{e:#}"), "Unhandled error reached the API boundary");
        Self::internal("Internal Server Error")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut resp = self.to_envelope("").into_response();
        resp.extensions_mut().insert(self);
        resp
    }
}
