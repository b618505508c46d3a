use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{get_scorecard, list_skins, record_hole, settle_group};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/skins", get(list_skins))
        .route("/groups/:group/scorecard", get(get_scorecard))
        .route("/groups/:group/holes/:hole", put(record_hole))
        .route("/groups/:group/settle", post(settle_group))
}
