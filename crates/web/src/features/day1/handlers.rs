use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::score::{Day1ScoreFilter, RecordDay1ScoreRequest},
    models::{Course, Day1Score, Team},
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/day1/scores",
    params(Day1ScoreFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Day 1 scores", body = Vec<Day1Score>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day1"
)]
pub async fn list_scores(
    State(state): State<AppState>,
    Query(filter): Query<Day1ScoreFilter>,
) -> Result<Json<Vec<Day1Score>>, WebError> {
    let scores = services::list_scores(state.store.as_ref(), filter.team).await?;

    Ok(Json(scores))
}

#[utoipa::path(
    put,
    path = "/api/day1/teams/{team}/holes/{hole}",
    params(
        ("team" = Team, Path, description = "Team slug"),
        ("hole" = i16, Path, description = "Hole number, 1 to 18")
    ),
    request_body = RecordDay1ScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score recorded", body = Day1Score),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day1"
)]
pub async fn record_score(
    State(state): State<AppState>,
    Path((team, hole)): Path<(Team, i16)>,
    Json(req): Json<RecordDay1ScoreRequest>,
) -> Result<Response, WebError> {
    if !Course::Day1.contains_hole(hole) {
        return Err(WebError::BadRequest(format!(
            "hole must be between 1 and {}",
            Course::Day1.hole_count()
        )));
    }
    req.validate()?;

    let score = services::record_score(state.store.as_ref(), team, hole, &req).await?;

    Ok(Json(score).into_response())
}
