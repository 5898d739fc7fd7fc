use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        user::{UpdateUserRequest, UserFilter, UserResponse},
    },
    models::Permission,
};
use validator::Validate;

use crate::error::WebError;
use crate::features::check_pagination;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Page of user accounts", body = PaginatedResponse<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_USERS")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<UserFilter>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageUsers)?;
    check_pagination(filter.pagination())?;

    let page = services::list_users(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_USERS"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageUsers)?;

    let found = services::get_user(&db, &id).await?;

    Ok(Json(found).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_USERS"),
        (status = 404, description = "User or team not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageUsers)?;
    req.validate()?;

    let updated = services::update_user(&db, &id, &req).await?;
    tracing::info!(by = %user.id, user = %id, "User account updated");

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_USERS"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageUsers)?;

    services::deactivate_user(&db, &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
