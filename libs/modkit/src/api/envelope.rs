use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Wire format of envelope timestamps: local time, millisecond precision, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Marker stored in response extensions once a body has been rendered as an error envelope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EnvelopeRendered;

/// Body of every successful response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuccessEnvelope<T> {
    /// Moment the response was built.
    #[serde(with = "local_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Numeric HTTP status, mirrors the response status line.
    pub status: u16,
    /// Fixed, human-readable message of the operation.
    pub message: String,
    /// Operation payload; `null` for operations without a result.
    pub data: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            timestamp: now(),
            status: status.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn without_data(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: now(),
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for SuccessEnvelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Body of every failed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[serde(with = "local_timestamp")]
    pub timestamp: NaiveDateTime,
    pub status: u16,
    /// Reason phrase of `status`, e.g. "Not Found".
    pub error: String,
    pub message: String,
    /// Path of the request that failed.
    pub path: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: now(),
            status: status.as_u16(),
            error: reason_phrase(status).to_string(),
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let mut resp = (self.status_code(), Json(self)).into_response();
        resp.extensions_mut().insert(EnvelopeRendered);
        resp
    }
}

pub(crate) fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

mod local_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
