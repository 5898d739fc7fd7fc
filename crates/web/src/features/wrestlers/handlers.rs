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
        wrestler::{CreateWrestlerRequest, UpdateWrestlerRequest, WrestlerFilter, WrestlerResponse},
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
    path = "/api/v1/wrestlers",
    params(WrestlerFilter),
    responses(
        (status = 200, description = "Page of active wrestlers", body = PaginatedResponse<WrestlerResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "wrestlers"
)]
pub async fn list_wrestlers(
    State(db): State<Database>,
    Query(filter): Query<WrestlerFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_wrestlers(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/wrestlers/{id}",
    params(
        ("id" = String, Path, description = "Wrestler id")
    ),
    responses(
        (status = 200, description = "Wrestler found", body = WrestlerResponse),
        (status = 404, description = "Wrestler not found")
    ),
    tag = "wrestlers"
)]
pub async fn get_wrestler(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let wrestler = services::get_wrestler(&db, &id).await?;

    Ok(Json(wrestler).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/wrestlers/license/{license_number}",
    params(
        ("license_number" = String, Path, description = "Federation license number")
    ),
    responses(
        (status = 200, description = "Wrestler found", body = WrestlerResponse),
        (status = 404, description = "No active wrestler holds this license")
    ),
    tag = "wrestlers"
)]
pub async fn get_wrestler_by_license(
    State(db): State<Database>,
    Path(license_number): Path<String>,
) -> Result<Response, WebError> {
    let wrestler = services::get_wrestler_by_license(&db, &license_number).await?;

    Ok(Json(wrestler).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/wrestlers",
    request_body = CreateWrestlerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Wrestler registered", body = WrestlerResponse),
        (status = 400, description = "Validation error or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_WRESTLERS for this team"),
        (status = 409, description = "License number already exists")
    ),
    tag = "wrestlers"
)]
pub async fn create_wrestler(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateWrestlerRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageWrestlers)?;
    req.validate()?;

    let wrestler = services::create_wrestler(&db, &user, &req).await?;

    Ok((StatusCode::CREATED, Json(wrestler)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/wrestlers/{id}",
    params(
        ("id" = String, Path, description = "Wrestler id")
    ),
    request_body = UpdateWrestlerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Wrestler updated", body = WrestlerResponse),
        (status = 400, description = "Validation error or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_WRESTLERS for this team"),
        (status = 404, description = "Wrestler not found"),
        (status = 409, description = "License number already exists")
    ),
    tag = "wrestlers"
)]
pub async fn update_wrestler(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWrestlerRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageWrestlers)?;
    req.validate()?;

    let wrestler = services::update_wrestler(&db, &user, &id, &req).await?;

    Ok(Json(wrestler).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/wrestlers/{id}",
    params(
        ("id" = String, Path, description = "Wrestler id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Wrestler deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_WRESTLERS for this team"),
        (status = 404, description = "Wrestler not found")
    ),
    tag = "wrestlers"
)]
pub async fn delete_wrestler(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageWrestlers)?;

    services::deactivate_wrestler(&db, &user, &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
