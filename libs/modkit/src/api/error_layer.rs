//! Centralized error mapping for Axum
//!
//! Every failed response leaves the router as an [`ErrorEnvelope`] stamped with
//! the request path, whether it came from a handler returning [`ApiError`] or
//! from the framework itself (unknown route, wrong method, timeout, body limit,
//! caught panic).

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::envelope::{reason_phrase, EnvelopeRendered, ErrorEnvelope};
use crate::api::error::ApiError;

/// Middleware that renders every non-success response as an error envelope.
pub async fn error_mapping_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    if let Some(err) = response.extensions().get::<ApiError>().cloned() {
        return rewrite(response, err.to_envelope(path));
    }

    // Already an envelope built with its path in place
    if response.extensions().get::<EnvelopeRendered>().is_some() {
        return response;
    }

    let envelope = map_status_to_envelope(response.status(), &path);
    rewrite(response, envelope)
}

/// Fallback for failures that never went through [`ApiError`]: the status is
/// kept and its reason phrase becomes the message.
pub fn map_status_to_envelope(status: StatusCode, path: &str) -> ErrorEnvelope {
    if status.is_server_error() {
        tracing::error!(%status, path, "Request failed without an API error");
    }
    ErrorEnvelope::new(status, reason_phrase(status), path)
}

/// Swap the body for the envelope, keeping status-independent headers (e.g. `allow`).
fn rewrite(response: Response, envelope: ErrorEnvelope) -> Response {
    let (mut parts, _) = response.into_parts();

    let body = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error envelope");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    parts.status = envelope.status_code();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.extensions.insert(EnvelopeRendered);

    Response::from_parts(parts, Body::from(body))
}
