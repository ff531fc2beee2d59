use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes;
use crate::domain::service::Service;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmUsersStore;

/// The users module: owns the domain service and knows how to migrate its
/// schema and mount its REST endpoints.
#[derive(Clone)]
pub struct UsersInfo {
    service: Arc<Service>,
}

impl UsersInfo {
    /// Wire the SeaORM store to the domain service.
    pub fn new(db: DatabaseConnection) -> Self {
        let store = SeaOrmUsersStore::new(db);
        Self {
            service: Arc::new(Service::new(Arc::new(store))),
        }
    }

    /// Apply pending migrations for the `users` table.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running users_info database migrations");
        Migrator::up(db, None).await?;
        info!("users_info database migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering users_info REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
