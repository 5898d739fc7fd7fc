use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{login, me, register};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(protected)
}
