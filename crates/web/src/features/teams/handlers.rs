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
        team::{CreateTeamRequest, TeamFilter, TeamResponse, UpdateTeamRequest},
        wrestler::WrestlerResponse,
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
    path = "/api/v1/teams",
    params(TeamFilter),
    responses(
        (status = 200, description = "Page of active teams", body = PaginatedResponse<TeamResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Query(filter): Query<TeamFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_teams(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}",
    params(
        ("id" = String, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let team = services::get_team(&db, &id).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}/wrestlers",
    params(
        ("id" = String, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Active wrestlers of the team", body = Vec<WrestlerResponse>),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn list_team_wrestlers(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let wrestlers = services::list_team_wrestlers(&db, &id).await?;

    Ok(Json(wrestlers).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_TEAMS")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageTeams)?;
    req.validate()?;

    let team = services::create_team(&db, &req).await?;
    tracing::info!(by = %user.id, team = %team.id, "Team created");

    Ok((StatusCode::CREATED, Json(team)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/teams/{id}",
    params(
        ("id" = String, Path, description = "Team id")
    ),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Neither MANAGE_TEAMS nor coach of this team"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    user.require_team_editor(&id)?;
    req.validate()?;

    let team = services::update_team(&db, &id, &req).await?;

    Ok(Json(team).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}",
    params(
        ("id" = String, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Team deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_TEAMS"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageTeams)?;

    services::deactivate_team(&db, &id).await?;
    tracing::info!(by = %user.id, team = %id, "Team deactivated");

    Ok(StatusCode::NO_CONTENT.into_response())
}
