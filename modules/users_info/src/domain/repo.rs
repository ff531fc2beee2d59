use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{NewUser, User};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// All users, ascending by id.
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    /// Load a user by id.
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;
    /// Check whether a user with `id` exists.
    async fn exists_by_id(&self, id: i32) -> anyhow::Result<bool>;
    /// Check whether any user has `email`.
    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool>;
    /// Insert or update.
    ///
    /// Without an id a row is inserted and the database assigns the id.
    /// With an id the row is updated if it exists and inserted under that id otherwise.
    /// Unique constraint failures come back as [`UniqueViolation`].
    async fn save(&self, user: NewUser) -> anyhow::Result<User>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete_by_id(&self, id: i32) -> anyhow::Result<bool>;
}

/// Opens units of work. Implemented by the storage adapter.
#[async_trait]
pub trait UsersStore: Send + Sync {
    async fn begin(&self) -> anyhow::Result<Box<dyn UnitOfWork>>;
}

/// Repository bound to one transaction. Dropping it without `commit` rolls back.
#[async_trait]
pub trait UnitOfWork: UsersRepository {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}

/// Column guarded by a unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Id,
    Email,
}

/// A write was rejected by a unique constraint.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unique constraint violated on {field:?}")]
pub struct UniqueViolation {
    pub field: UniqueField,
}
