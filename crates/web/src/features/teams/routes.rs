use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_team, delete_team, get_team, list_team_wrestlers, list_teams, update_team,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_team))
        .route("/:id", put(update_team))
        .route("/:id", delete(delete_team))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_teams))
        .route("/:id", get(get_team))
        .route("/:id/wrestlers", get(list_team_wrestlers))
        .merge(protected)
}
