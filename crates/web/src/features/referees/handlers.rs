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
        referee::{CreateRefereeRequest, RefereeFilter, RefereeResponse, UpdateRefereeRequest},
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
    path = "/api/v1/referees",
    params(RefereeFilter),
    responses(
        (status = 200, description = "Page of active referees", body = PaginatedResponse<RefereeResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "referees"
)]
pub async fn list_referees(
    State(db): State<Database>,
    Query(filter): Query<RefereeFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_referees(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/referees/{id}",
    params(
        ("id" = String, Path, description = "Referee id")
    ),
    responses(
        (status = 200, description = "Referee found", body = RefereeResponse),
        (status = 404, description = "Referee not found")
    ),
    tag = "referees"
)]
pub async fn get_referee(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let referee = services::get_referee(&db, &id).await?;

    Ok(Json(referee).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/referees",
    request_body = CreateRefereeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Referee registered", body = RefereeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_REFEREES"),
        (status = 409, description = "License number already exists")
    ),
    tag = "referees"
)]
pub async fn create_referee(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateRefereeRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageReferees)?;
    req.validate()?;

    let referee = services::create_referee(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(referee)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/referees/{id}",
    params(
        ("id" = String, Path, description = "Referee id")
    ),
    request_body = UpdateRefereeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Referee updated", body = RefereeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_REFEREES"),
        (status = 404, description = "Referee not found"),
        (status = 409, description = "License number already exists")
    ),
    tag = "referees"
)]
pub async fn update_referee(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRefereeRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageReferees)?;
    req.validate()?;

    let referee = services::update_referee(&db, &id, &req).await?;

    Ok(Json(referee).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/referees/{id}",
    params(
        ("id" = String, Path, description = "Referee id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Referee deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_REFEREES"),
        (status = 404, description = "Referee not found")
    ),
    tag = "referees"
)]
pub async fn delete_referee(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageReferees)?;

    services::deactivate_referee(&db, &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
