use axum::{Router, routing::get};

use super::handlers::health;
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
