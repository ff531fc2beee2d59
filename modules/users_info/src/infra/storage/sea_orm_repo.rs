//! SeaORM-backed implementation of the storage ports.
//!
//! [`SeaOrmUsersRepository`] is generic over `C: ConnectionTrait`, so the same
//! code runs on a pooled `DatabaseConnection` or on a `DatabaseTransaction`.
//! [`SeaOrmUsersStore`] hands out the transactional flavour as a unit of work.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

use crate::contract::{NewUser, User};
use crate::domain::repo::{UniqueField, UniqueViolation, UnitOfWork, UsersRepository, UsersStore};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn exists_by_id(&self, id: i32) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(Column::Id.eq(id))
            .count(&self.conn)
            .await
            .context("exists_by_id failed")?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("exists_by_email failed")?;
        Ok(count > 0)
    }

    async fn save(&self, u: NewUser) -> anyhow::Result<User> {
        // An id only selects the row to update; new rows always get a database id.
        let target = match u.id {
            Some(id) if self.exists_by_id(id).await? => Set(id),
            _ => NotSet,
        };
        let existing = target.is_set();

        let m = UserAM {
            id: target,
            name: Set(u.name),
            email: Set(u.email),
        };

        let saved = if existing {
            m.update(&self.conn).await
        } else {
            m.insert(&self.conn).await
        };

        saved.map(Into::into).map_err(write_error)
    }

    async fn delete_by_id(&self, id: i32) -> anyhow::Result<bool> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete_by_id failed")?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait::async_trait]
impl UnitOfWork for SeaOrmUsersRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let this = *self;
        this.conn.commit().await.context("commit failed")
    }
}

/// Opens one transaction per unit of work on a shared pool.
#[derive(Clone)]
pub struct SeaOrmUsersStore {
    db: DatabaseConnection,
}

impl SeaOrmUsersStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UsersStore for SeaOrmUsersStore {
    async fn begin(&self) -> anyhow::Result<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await.context("begin transaction failed")?;
        Ok(Box::new(SeaOrmUsersRepository::new(txn)))
    }
}

/// Unique violations become a typed [`UniqueViolation`]; everything else keeps its context.
fn write_error(e: DbErr) -> anyhow::Error {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            let field = if detail.to_ascii_lowercase().contains("email") {
                UniqueField::Email
            } else {
                UniqueField::Id
            };
            tracing::debug!(%detail, ?field, "Write rejected by unique constraint");
            anyhow::Error::new(UniqueViolation { field })
        }
        _ => anyhow::Error::new(e).context("save failed"),
    }
}
