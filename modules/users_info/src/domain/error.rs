use thiserror::Error;

/// Domain-specific errors.
/// The `Display` text of the non-database variants is the message shown to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found with id {id}")]
    UserNotFound { id: i32 },

    #[error("A user with the same id already exists")]
    IdAlreadyExists { id: i32 },

    #[error("A user with the same email already exists")]
    EmailAlreadyExists { email: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i32) -> Self {
        Self::UserNotFound { id }
    }

    pub fn id_already_exists(id: i32) -> Self {
        Self::IdAlreadyExists { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}
