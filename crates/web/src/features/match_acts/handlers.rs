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
        match_act::{
            CreateMatchActRequest, MatchActFilter, MatchActResponse, SignMatchActRequest,
            UpdateMatchActRequest,
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
    path = "/api/v1/matchacts",
    params(MatchActFilter),
    responses(
        (status = 200, description = "Page of match acts, most recent first", body = PaginatedResponse<MatchActResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "match-acts"
)]
pub async fn list_match_acts(
    State(db): State<Database>,
    Query(filter): Query<MatchActFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_match_acts(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/matchacts/{id}",
    params(
        ("id" = String, Path, description = "Match act id")
    ),
    responses(
        (status = 200, description = "Match act found", body = MatchActResponse),
        (status = 404, description = "Match act not found")
    ),
    tag = "match-acts"
)]
pub async fn get_match_act(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let act = services::get_match_act(&db, &id).await?;

    Ok(Json(act).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/matchacts/match/{match_id}",
    params(
        ("match_id" = String, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "The act of the match", body = MatchActResponse),
        (status = 404, description = "The match has no act")
    ),
    tag = "match-acts"
)]
pub async fn get_match_act_by_match(
    State(db): State<Database>,
    Path(match_id): Path<String>,
) -> Result<Response, WebError> {
    let act = services::get_match_act_by_match(&db, &match_id).await?;

    Ok(Json(act).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/matchacts",
    request_body = CreateMatchActRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Draft match act created", body = MatchActResponse),
        (status = 400, description = "Validation error, unknown match or invalid bouts"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCH_ACTS"),
        (status = 409, description = "The match already has an act")
    ),
    tag = "match-acts"
)]
pub async fn create_match_act(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateMatchActRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatchActs)?;
    req.validate()?;

    let act = services::create_match_act(&db, &user, &req).await?;

    Ok((StatusCode::CREATED, Json(act)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/matchacts/{id}",
    params(
        ("id" = String, Path, description = "Match act id")
    ),
    request_body = UpdateMatchActRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match act updated and re-scored", body = MatchActResponse),
        (status = 400, description = "Validation error or invalid bouts"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCH_ACTS"),
        (status = 404, description = "Match act not found"),
        (status = 409, description = "The act is already signed")
    ),
    tag = "match-acts"
)]
pub async fn update_match_act(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMatchActRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatchActs)?;
    req.validate()?;

    let act = services::update_match_act(&db, &id, &req).await?;

    Ok(Json(act).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/v1/matchacts/{id}/complete",
    params(
        ("id" = String, Path, description = "Match act id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match act completed, fixture result recorded", body = MatchActResponse),
        (status = 400, description = "Already completed or bouts without result"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCH_ACTS"),
        (status = 404, description = "Match act not found")
    ),
    tag = "match-acts"
)]
pub async fn complete_match_act(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatchActs)?;

    let act = services::complete_match_act(&db, &id).await?;

    Ok(Json(act).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/v1/matchacts/{id}/sign",
    params(
        ("id" = String, Path, description = "Match act id")
    ),
    request_body = SignMatchActRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Signature recorded", body = MatchActResponse),
        (status = 400, description = "The act is not completed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCH_ACTS"),
        (status = 404, description = "Match act not found"),
        (status = 409, description = "This party already signed")
    ),
    tag = "match-acts"
)]
pub async fn sign_match_act(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<SignMatchActRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatchActs)?;

    let act = services::sign_match_act(&db, &id, req.party).await?;
    tracing::info!(by = %user.id, act = %id, party = ?req.party, "Match act signed");

    Ok(Json(act).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/matchacts/{id}",
    params(
        ("id" = String, Path, description = "Match act id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match act deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_MATCH_ACTS"),
        (status = 404, description = "Match act not found"),
        (status = 409, description = "The act is already signed")
    ),
    tag = "match-acts"
)]
pub async fn delete_match_act(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageMatchActs)?;

    services::delete_match_act(&db, &id).await?;
    tracing::info!(by = %user.id, act = %id, "Match act deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
