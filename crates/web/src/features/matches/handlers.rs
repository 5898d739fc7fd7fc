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
        matches::{
            CreateMatchRequest, MatchFilter, MatchResponse, MatchResultRequest, UpdateMatchRequest,
        },
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
    path = "/api/v1/matches",
    params(MatchFilter),
    responses(
        (status = 200, description = "Page of fixtures by round", body = PaginatedResponse<MatchResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_matches(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let fixture = services::get_match(&db, &id).await?;

    Ok(Json(fixture).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match scheduled", body = MatchResponse),
        (status = 400, description = "Validation error or unknown competition, team or referee"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCHES")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatches)?;
    req.validate()?;

    let fixture = services::create_match(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(fixture)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match updated", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCHES"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Teams locked by a match act")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatches)?;
    req.validate()?;

    let fixture = services::update_match(&db, &id, &req).await?;

    Ok(Json(fixture).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/v1/matches/{id}/result",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    request_body = MatchResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result recorded and match closed", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCHES"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match has a match act")
    ),
    tag = "matches"
)]
pub async fn record_result(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<MatchResultRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatches)?;
    req.validate()?;

    let fixture = services::record_result(&db, &id, &req).await?;
    tracing::info!(by = %user.id, fixture = %id, "Match result recorded");

    Ok(Json(fixture).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCHES"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match has a match act")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatches)?;

    services::delete_match(&db, &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
