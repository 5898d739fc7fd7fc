use storage::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        user::UserResponse,
    },
    models::{User, UserRole},
    repository::user::{NewUser, UserRepository},
};

use crate::app::AppState;
use crate::auth::PasswordCheck;
use crate::error::{WebError, WebResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn login(state: &AppState, req: &LoginRequest) -> WebResult<AuthResponse> {
    let repo = UserRepository::new(state.db.mongo());

    let user = repo
        .find_by_email(&req.email)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| WebError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    match state.passwords.verify(&req.password, &user.password_hash).await? {
        PasswordCheck::Valid => {}
        PasswordCheck::ValidLegacy => {
            let upgraded = state.passwords.hash(&req.password).await?;
            repo.update_password_hash(&user.id, &upgraded).await?;
            tracing::info!(user = %user.id, "Upgraded legacy password hash");
        }
        PasswordCheck::Invalid => {
            tracing::info!("Failed login attempt");
            return Err(WebError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    }

    issue_token(state, user)
}

/// Open registration; new accounts are always guests
pub async fn register(state: &AppState, req: &RegisterRequest) -> WebResult<AuthResponse> {
    let password_hash = state.passwords.hash(&req.password).await?;

    let user = UserRepository::new(state.db.mongo())
        .create(NewUser {
            email: &req.email,
            name: &req.name,
            surname: &req.surname,
            role: UserRole::Guest,
            password_hash,
        })
        .await?;
    tracing::info!(user = %user.id, "Registered new account");

    issue_token(state, user)
}

pub async fn current_user(state: &AppState, user_id: &str) -> WebResult<UserResponse> {
    let user = UserRepository::new(state.db.mongo())
        .find_by_id(user_id)
        .await?;

    Ok(UserResponse::from(user))
}

fn issue_token(state: &AppState, user: User) -> WebResult<AuthResponse> {
    let token = state
        .jwt
        .issue(&user)
        .map_err(|e| WebError::InternalServerError(format!("Failed to sign token: {e}")))?;

    Ok(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expires_in(),
        user: UserResponse::from(user),
    })
}
