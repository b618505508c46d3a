use axum::{Router, routing::get};

use super::handlers::get_course;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:course", get(get_course))
}
