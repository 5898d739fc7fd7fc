use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use super::handlers::{
    create_match, delete_match, get_match, list_matches, record_result, update_match,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_match))
        .route("/:id", put(update_match))
        .route("/:id", delete(delete_match))
        .route("/:id/result", patch(record_result))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_matches))
        .route("/:id", get(get_match))
        .merge(protected)
}
