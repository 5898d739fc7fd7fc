use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    add_team, create_competition, delete_competition, get_competition, list_competitions,
    remove_team, update_competition,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_competition))
        .route("/:id", put(update_competition))
        .route("/:id", delete(delete_competition))
        .route("/:id/teams/:team_id", post(add_team).delete(remove_team))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_competitions))
        .route("/:id", get(get_competition))
        .merge(protected)
}
