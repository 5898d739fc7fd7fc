use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_wrestler, delete_wrestler, get_wrestler, get_wrestler_by_license, list_wrestlers,
    update_wrestler,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_wrestler))
        .route("/:id", put(update_wrestler))
        .route("/:id", delete(delete_wrestler))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_wrestlers))
        .route("/:id", get(get_wrestler))
        .route("/license/:license_number", get(get_wrestler_by_license))
        .merge(protected)
}
