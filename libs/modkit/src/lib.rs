//! # ModKit - REST boundary toolkit
//!
//! Shared building blocks for modules that expose HTTP endpoints:
//!
//! - **Envelopes**: every response body is either a [`SuccessEnvelope`] or an [`ErrorEnvelope`]
//! - **Errors**: handlers return [`ApiError`], which carries the HTTP status and message
//! - **Error layer**: [`error_mapping_middleware`] turns every failed response into an
//!   [`ErrorEnvelope`] stamped with the request path
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::http::StatusCode;
//! use modkit::{ApiError, SuccessEnvelope};
//!
//! async fn get_thing() -> Result<SuccessEnvelope<Thing>, ApiError> {
//!     let thing = load().await?;
//!     Ok(SuccessEnvelope::new(StatusCode::OK, "Thing retrieved successfully", thing))
//! }
//! ```

pub use anyhow::Result;

pub mod api;

pub use api::envelope::{ErrorEnvelope, SuccessEnvelope, TIMESTAMP_FORMAT};
pub use api::error::ApiError;
pub use api::error_layer::error_mapping_middleware;
