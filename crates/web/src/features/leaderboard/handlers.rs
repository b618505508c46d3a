use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use storage::dto::leaderboard::Leaderboard;
use utoipa::ToSchema;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub leaderboard: Leaderboard,
    pub generated_at: NaiveDateTime,
    /// Suggested interval for clients that auto-refresh
    pub refresh_interval_secs: u64,
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current team standings", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(state): State<AppState>) -> Result<Response, WebError> {
    let leaderboard = services::get_leaderboard(state.store.as_ref()).await?;

    Ok(Json(LeaderboardResponse {
        leaderboard,
        generated_at: Utc::now().naive_utc(),
        refresh_interval_secs: state.leaderboard_refresh_secs,
    })
    .into_response())
}
