use axum::{Router, middleware, routing::get};

use super::handlers::{add_favorite, favorite_status, list_favorites, remove_favorite};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

/// Favorites always belong to the caller, so every route is protected
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route(
            "/:entity_type/:entity_id",
            get(favorite_status).delete(remove_favorite),
        )
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth))
}
