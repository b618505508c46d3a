use storage::{
    ScoreStore,
    dto::score::RecordDay1ScoreRequest,
    error::Result,
    models::{Day1Score, Team},
};

/// Day 1 log, optionally for one team, ordered by team then hole
pub async fn list_scores(store: &dyn ScoreStore, team: Option<Team>) -> Result<Vec<Day1Score>> {
    let mut scores = store.list_day1_scores().await?;
    if let Some(team) = team {
        scores.retain(|s| s.team == team);
    }
    scores.sort_by_key(|s| s.key());
    Ok(scores)
}

pub async fn record_score(
    store: &dyn ScoreStore,
    team: Team,
    hole: i16,
    request: &RecordDay1ScoreRequest,
) -> Result<Day1Score> {
    let score = store
        .upsert_day1_score(
            team,
            hole,
            request.scramble_strokes,
            request.alt_shot_strokes,
        )
        .await?;

    tracing::info!(
        "Recorded day 1 hole {} for {}: scramble {}, alt shot {}",
        hole,
        team,
        score.scramble_strokes,
        score.alt_shot_strokes
    );

    Ok(score)
}
