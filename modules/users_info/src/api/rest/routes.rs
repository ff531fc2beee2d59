use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/users` endpoints onto `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let users = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            patch(handlers::patch_user).delete(handlers::delete_user),
        )
        .layer(Extension(service));

    router.merge(users)
}
