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
        competition::{
            CompetitionDetailResponse, CompetitionFilter, CompetitionResponse,
            CreateCompetitionRequest, UpdateCompetitionRequest,
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
    path = "/api/v1/competitions",
    params(CompetitionFilter),
    responses(
        (status = 200, description = "Page of competitions, newest season first", body = PaginatedResponse<CompetitionResponse>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    Query(filter): Query<CompetitionFilter>,
) -> Result<Response, WebError> {
    check_pagination(filter.pagination())?;

    let page = services::list_competitions(&db, &filter).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Competition with teams and match days", body = CompetitionDetailResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let competition = services::get_competition_detailed(&db, &id).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/competitions",
    request_body = CreateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competition created", body = CompetitionResponse),
        (status = 400, description = "Validation error or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_COMPETITIONS")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageCompetitions)?;
    req.validate()?;

    let competition = services::create_competition(&db, &req).await?;
    tracing::info!(by = %user.id, competition = %competition.id, "Competition created");

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    request_body = UpdateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition updated", body = CompetitionResponse),
        (status = 400, description = "Validation error or unknown team"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_COMPETITIONS"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCompetitionRequest>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageCompetitions)?;
    req.validate()?;

    let competition = services::update_competition(&db, &id, &req).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/competitions/{id}",
    params(
        ("id" = String, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Competition deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_COMPETITIONS"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Competition still has matches")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageCompetitions)?;

    services::delete_competition(&db, &id).await?;
    tracing::info!(by = %user.id, competition = %id, "Competition deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/competitions/{id}/teams/{team_id}",
    params(
        ("id" = String, Path, description = "Competition id"),
        ("team_id" = String, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team enrolled", body = CompetitionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_COMPETITIONS"),
        (status = 404, description = "Competition or team not found")
    ),
    tag = "competitions"
)]
pub async fn add_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((id, team_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageCompetitions)?;

    let competition = services::add_team(&db, &id, &team_id).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/competitions/{id}/teams/{team_id}",
    params(
        ("id" = String, Path, description = "Competition id"),
        ("team_id" = String, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team withdrawn", body = CompetitionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing MANAGE_COMPETITIONS"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn remove_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((id, team_id)): Path<(String, String)>,
) -> Result<Response, WebError> {
    user.require(Permission::ManageCompetitions)?;

    let competition = services::remove_team(&db, &id, &team_id).await?;

    Ok(Json(competition).into_response())
}
