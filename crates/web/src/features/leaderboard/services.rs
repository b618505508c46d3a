use storage::{ScoreStore, dto::leaderboard::Leaderboard, error::Result, services::leaderboard};

/// Standings recomputed from the raw scores
pub async fn get_leaderboard(store: &dyn ScoreStore) -> Result<Leaderboard> {
    leaderboard::leaderboard(store).await
}
