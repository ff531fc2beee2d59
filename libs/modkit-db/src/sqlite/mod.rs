//! SQLite DSN helpers.

mod path;

pub use path::{absolutize_sqlite_dsn, is_memory_dsn};
pub(crate) use path::prepare_sqlite_path;

/// Canonical in-memory DSN.
pub const MEMORY_DSN: &str = "sqlite::memory:";
