//! REST boundary: response envelopes, the API error type and the layer that
//! renders failures as error envelopes.

pub mod envelope;
pub mod error;
pub mod error_layer;
pub mod response;

pub use envelope::{ErrorEnvelope, SuccessEnvelope};
pub use error::ApiError;
pub use error_layer::error_mapping_middleware;
