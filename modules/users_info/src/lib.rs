//! Users module: CRUD over `User { id, name, email }`.
//!
//! Layout:
//! - `contract`: plain models shared with callers
//! - `domain`: business rules and the storage ports
//! - `infra`: SeaORM entity, repository and migrations
//! - `api::rest`: DTOs, validation, handlers, routes

pub mod contract;
pub use contract::model::{NewUser, User, UserPatch};

pub mod module;
pub use module::UsersInfo;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
