use axum::{Router, middleware, routing::get};

use super::handlers::{delete_user, get_user, list_users, update_user};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

/// Every user route is protected
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth))
}
