use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    create_referee, delete_referee, get_referee, list_referees, update_referee,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_referee))
        .route("/:id", put(update_referee).delete(delete_referee))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_referees))
        .route("/:id", get(get_referee))
        .merge(protected)
}
