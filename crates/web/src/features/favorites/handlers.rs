use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::favorite::{AddFavoriteRequest, FavoriteFilter, FavoriteResponse, FavoriteStatusResponse},
    models::FavoriteType,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    params(FavoriteFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Favorites of the caller, newest first", body = Vec<FavoriteResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "favorites"
)]
pub async fn list_favorites(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<FavoriteFilter>,
) -> Result<Response, WebError> {
    let favorites = services::list_favorites(&db, &user.id, filter.entity_type).await?;

    Ok(Json(favorites).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = AddFavoriteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Favorite stored, or the existing one returned", body = FavoriteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entity not found")
    ),
    tag = "favorites"
)]
pub async fn add_favorite(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let favorite = services::add_favorite(&db, &user.id, &req.entity_id, req.entity_type).await?;

    Ok((StatusCode::CREATED, Json(favorite)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{entity_type}/{entity_id}",
    params(
        ("entity_type" = FavoriteType, Path, description = "TEAM, WRESTLER or COMPETITION"),
        ("entity_id" = String, Path, description = "Id of the favorite entity")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Favorite removed, or was not set"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "favorites"
)]
pub async fn remove_favorite(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((entity_type, entity_id)): Path<(FavoriteType, String)>,
) -> Result<Response, WebError> {
    services::remove_favorite(&db, &user.id, &entity_id, entity_type).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites/{entity_type}/{entity_id}",
    params(
        ("entity_type" = FavoriteType, Path, description = "TEAM, WRESTLER or COMPETITION"),
        ("entity_id" = String, Path, description = "Id of the entity")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Whether the caller marked the entity", body = FavoriteStatusResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "favorites"
)]
pub async fn favorite_status(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((entity_type, entity_id)): Path<(FavoriteType, String)>,
) -> Result<Response, WebError> {
    let status = services::favorite_status(&db, &user.id, &entity_id, entity_type).await?;

    Ok(Json(status).into_response())
}
