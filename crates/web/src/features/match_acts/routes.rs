use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use super::handlers::{
    complete_match_act, create_match_act, delete_match_act, get_match_act,
    get_match_act_by_match, list_match_acts, sign_match_act, update_match_act,
};
use crate::app::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_match_act))
        .route("/:id", put(update_match_act))
        .route("/:id", delete(delete_match_act))
        .route("/:id/complete", patch(complete_match_act))
        .route("/:id/sign", patch(sign_match_act))
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_match_acts))
        .route("/:id", get(get_match_act))
        .route("/match/:match_id", get(get_match_act_by_match))
        .merge(protected)
}
