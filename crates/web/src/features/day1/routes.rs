use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{list_scores, record_score};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scores", get(list_scores))
        .route("/teams/:team/holes/:hole", put(record_score))
}
