use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::score::{RecordDay2ScoresRequest, ScorecardResponse},
    models::{Course, GROUPS, SkinWin},
    services::skins::GroupSettlement,
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services::{self, RecordHoleResponse};

fn check_group(group: i16) -> Result<(), WebError> {
    if GROUPS.contains(&group) {
        Ok(())
    } else {
        Err(WebError::BadRequest(format!(
            "group must be between {} and {}",
            GROUPS.start(),
            GROUPS.end()
        )))
    }
}

#[utoipa::path(
    get,
    path = "/api/day2/groups/{group}/scorecard",
    params(
        ("group" = i16, Path, description = "Group number, 1 to 5")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Group scorecard with skin results", body = ScorecardResponse),
        (status = 400, description = "Invalid group"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day2"
)]
pub async fn get_scorecard(
    State(state): State<AppState>,
    Path(group): Path<i16>,
) -> Result<Response, WebError> {
    check_group(group)?;

    let scorecard = services::get_scorecard(state.store.as_ref(), group).await?;

    Ok(Json(scorecard).into_response())
}

#[utoipa::path(
    put,
    path = "/api/day2/groups/{group}/holes/{hole}",
    params(
        ("group" = i16, Path, description = "Group number, 1 to 5"),
        ("hole" = i16, Path, description = "Hole number, 1 to 9")
    ),
    request_body = RecordDay2ScoresRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scores recorded and group settled", body = RecordHoleResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day2"
)]
pub async fn record_hole(
    State(state): State<AppState>,
    Path((group, hole)): Path<(i16, i16)>,
    Json(req): Json<RecordDay2ScoresRequest>,
) -> Result<Response, WebError> {
    check_group(group)?;
    if !Course::Day2.contains_hole(hole) {
        return Err(WebError::BadRequest(format!(
            "hole must be between 1 and {}",
            Course::Day2.hole_count()
        )));
    }
    req.validate()?;
    req.validate_unique_teams().map_err(WebError::BadRequest)?;

    let response = services::record_hole(state.store.as_ref(), group, hole, &req).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/day2/groups/{group}/settle",
    params(
        ("group" = i16, Path, description = "Group number, 1 to 5")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Group recomputed from raw scores", body = GroupSettlement),
        (status = 400, description = "Invalid group"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day2"
)]
pub async fn settle_group(
    State(state): State<AppState>,
    Path(group): Path<i16>,
) -> Result<Response, WebError> {
    check_group(group)?;

    let settlement = services::settle_group(state.store.as_ref(), group).await?;

    Ok(Json(settlement).into_response())
}

#[utoipa::path(
    get,
    path = "/api/day2/skins",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Persisted skin wins", body = Vec<SkinWin>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "day2"
)]
pub async fn list_skins(State(state): State<AppState>) -> Result<Json<Vec<SkinWin>>, WebError> {
    let wins = services::list_skin_wins(state.store.as_ref()).await?;

    Ok(Json(wins))
}
