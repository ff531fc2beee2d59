use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Extension, Json,
};
use modkit::api::response::{created, ok, ok_empty};
use modkit::{ApiError, SuccessEnvelope};
use tracing::info;

use crate::api::rest::dto::{CreateUserReq, PatchUserReq, UserDto};
use crate::api::rest::validation::{validate_new_user, validate_user_patch};
use crate::domain::service::Service;

pub const USERS_RETRIEVED: &str = "Users retrieved successfully";
pub const USER_CREATED: &str = "User created successfully";
pub const USER_PATCHED: &str = "User patched successfully";
pub const USER_DELETED: &str = "User deleted successfully";

/// List all users
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<SuccessEnvelope<Vec<UserDto>>, ApiError> {
    let users = svc.list_users().await?;
    Ok(ok(
        USERS_RETRIEVED,
        users.into_iter().map(UserDto::from).collect(),
    ))
}

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<SuccessEnvelope<UserDto>, ApiError> {
    let Json(req) = body?;
    info!("Creating user: {:?}", req);

    let new_user = validate_new_user(req)?;
    let user = svc.create_user(new_user).await?;
    Ok(created(USER_CREATED, UserDto::from(user)))
}

/// Apply the present fields of the body to an existing user
pub async fn patch_user(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<PatchUserReq>, JsonRejection>,
) -> Result<SuccessEnvelope<UserDto>, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    info!("Patching user {}: {:?}", id, req);

    let patch = validate_user_patch(req)?;
    let user = svc.patch_user(id, patch).await?;
    Ok(ok(USER_PATCHED, UserDto::from(user)))
}

/// Delete a user by id
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<SuccessEnvelope<()>, ApiError> {
    let Path(id) = id?;
    info!("Deleting user: {}", id);

    svc.delete_user(id).await?;
    Ok(ok_empty(USER_DELETED))
}
