use modkit::ApiError;

use crate::domain::error::DomainError;

/// Map a domain error to the API error shown to callers.
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::UserNotFound { .. } => ApiError::not_found(e.to_string()),
        DomainError::IdAlreadyExists { .. } | DomainError::EmailAlreadyExists { .. } => {
            ApiError::conflict(e.to_string())
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ApiError::internal("An internal database error occurred")
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}
