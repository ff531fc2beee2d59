//! ModKit database handle.
//!
//! Opens a pooled SQLite or PostgreSQL connection through SQLx and exposes it
//! as a SeaORM [`DatabaseConnection`] for repositories and migrations.
//!
//! ```rust,no_run
//! # async fn demo() -> modkit_db::Result<()> {
//! use modkit_db::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite://database/users.db", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! # let _ = conn;
//! db.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod options;
pub mod sqlite;

pub use options::{redact_credentials_in_dsn, ConnectOpts};

use std::str::FromStr;

use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Main handle.
#[derive(Debug, Clone)]
pub struct DbHandle {
    engine: DbEngine,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Detect engine by DSN scheme.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();

        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(Some(dsn))))
        }
    }

    /// Connect and build handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        let sea = match engine {
            DbEngine::Postgres => {
                let mut o = PgPoolOptions::new();
                if let Some(n) = opts.max_conns {
                    o = o.max_connections(n);
                }
                if let Some(n) = opts.min_conns {
                    o = o.min_connections(n);
                }
                if let Some(t) = opts.acquire_timeout {
                    o = o.acquire_timeout(t);
                }
                if let Some(t) = opts.idle_timeout {
                    o = o.idle_timeout(t);
                }
                if let Some(t) = opts.max_lifetime {
                    o = o.max_lifetime(t);
                }
                let pool = o.connect(dsn.trim()).await?;
                SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
            }
            DbEngine::Sqlite => {
                let dsn = dsn.trim();
                sqlite::prepare_sqlite_path(dsn, opts.create_sqlite_dirs)?;
                let in_memory = sqlite::is_memory_dsn(dsn);

                let parse_from = if in_memory { sqlite::MEMORY_DSN } else { dsn };
                let mut conn_opts = SqliteConnectOptions::from_str(parse_from)?
                    .create_if_missing(true)
                    .busy_timeout(opts.sqlite_busy_timeout);
                if !in_memory {
                    conn_opts = conn_opts.journal_mode(SqliteJournalMode::Wal);
                }

                let mut o = SqlitePoolOptions::new();
                if in_memory {
                    // Every connection opens its own private database: keep exactly one alive.
                    o = o
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None)
                        .max_lifetime(None);
                } else {
                    if let Some(n) = opts.max_conns {
                        o = o.max_connections(n);
                    }
                    if let Some(n) = opts.min_conns {
                        o = o.min_connections(n);
                    }
                    if let Some(t) = opts.idle_timeout {
                        o = o.idle_timeout(t);
                    }
                    if let Some(t) = opts.max_lifetime {
                        o = o.max_lifetime(t);
                    }
                }
                if let Some(t) = opts.acquire_timeout {
                    o = o.acquire_timeout(t);
                }

                let pool = o.connect_with(conn_opts).await?;
                SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
            }
        };

        let dsn = redact_credentials_in_dsn(Some(dsn.trim()));
        tracing::debug!(?engine, dsn = %dsn, "Database pool opened");
        Ok(Self { engine, dsn, sea })
    }

    /// Get the backend.
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// DSN with credentials redacted.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection (cheap to clone, shares the pool).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Close the pool.
    pub async fn close(self) -> Result<()> {
        self.sea.close().await?;
        Ok(())
    }
}
