use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    user::UserResponse,
};
use validator::Validate;

use crate::app::AppState;
use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::login(&state, &req).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::register(&state, &req).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let response = services::current_user(&state, &user.id).await?;

    Ok(Json(response).into_response())
}
