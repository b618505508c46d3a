use serde::Serialize;
use storage::{
    ScoreStore,
    dto::score::{RecordDay2ScoresRequest, ScorecardResponse},
    error::Result,
    models::{Day2Score, SkinWin},
    services::skins::{self, GroupSettlement},
};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordHoleResponse {
    pub scores: Vec<Day2Score>,
    pub settlement: GroupSettlement,
}

/// Stores the submitted strokes, then recomputes the whole group.
pub async fn record_hole(
    store: &dyn ScoreStore,
    group: i16,
    hole: i16,
    request: &RecordDay2ScoresRequest,
) -> Result<RecordHoleResponse> {
    let mut scores = Vec::with_capacity(request.scores.len());
    for entry in &request.scores {
        let score = store
            .upsert_day2_score(group, hole, entry.team, entry.strokes)
            .await?;
        scores.push(score);
    }

    tracing::info!(
        "Recorded {} score(s) for group {} hole {}",
        scores.len(),
        group,
        hole
    );

    let settlement = skins::settle_group(store, group).await?;

    Ok(RecordHoleResponse { scores, settlement })
}

pub async fn settle_group(store: &dyn ScoreStore, group: i16) -> Result<GroupSettlement> {
    skins::settle_group(store, group).await
}

/// Scorecard with freshly computed skins for every hole
pub async fn get_scorecard(store: &dyn ScoreStore, group: i16) -> Result<ScorecardResponse> {
    let scores = store.list_day2_scores(group).await?;
    let results = skins::settle(group, &scores);
    Ok(ScorecardResponse::build(group, &scores, &results))
}

pub async fn list_skin_wins(store: &dyn ScoreStore) -> Result<Vec<SkinWin>> {
    store.list_skin_wins().await
}
