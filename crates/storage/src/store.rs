use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::Database;
use crate::error::Result;
use crate::models::{
    Day1Key, Day1Score, Day2Key, Day2Score, NewSkinWin, SkinKey, SkinWin, Team,
};
use crate::repository::{
    day1_score::Day1ScoreRepository, day2_score::Day2ScoreRepository, skin::SkinRepository,
};

/// Key-value persistence of the raw score log and the mirror of resolved
/// skins. Upserts replace the record with the same key or append a new one.
/// Implementations give no transactional guarantees across calls.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn list_day1_scores(&self) -> Result<Vec<Day1Score>>;

    async fn upsert_day1_score(
        &self,
        team: Team,
        hole: i16,
        scramble_strokes: i16,
        alt_shot_strokes: i16,
    ) -> Result<Day1Score>;

    async fn list_day2_scores(&self, group: i16) -> Result<Vec<Day2Score>>;

    async fn upsert_day2_score(
        &self,
        group: i16,
        hole: i16,
        team: Team,
        strokes: i16,
    ) -> Result<Day2Score>;

    /// Resolved wins only; ties are never persisted.
    async fn list_skin_wins(&self) -> Result<Vec<SkinWin>>;

    async fn upsert_skin_win(&self, win: &NewSkinWin) -> Result<SkinWin>;

    /// Returns whether a row was removed.
    async fn delete_skin_row(&self, group: i16, hole: i16) -> Result<bool>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScoreStore for PgStore {
    async fn list_day1_scores(&self) -> Result<Vec<Day1Score>> {
        Day1ScoreRepository::new(self.db.pool()).list().await
    }

    async fn upsert_day1_score(
        &self,
        team: Team,
        hole: i16,
        scramble_strokes: i16,
        alt_shot_strokes: i16,
    ) -> Result<Day1Score> {
        Day1ScoreRepository::new(self.db.pool())
            .upsert(team, hole, scramble_strokes, alt_shot_strokes)
            .await
    }

    async fn list_day2_scores(&self, group: i16) -> Result<Vec<Day2Score>> {
        Day2ScoreRepository::new(self.db.pool())
            .list_for_group(group)
            .await
    }

    async fn upsert_day2_score(
        &self,
        group: i16,
        hole: i16,
        team: Team,
        strokes: i16,
    ) -> Result<Day2Score> {
        Day2ScoreRepository::new(self.db.pool())
            .upsert(group, hole, team, strokes)
            .await
    }

    async fn list_skin_wins(&self) -> Result<Vec<SkinWin>> {
        SkinRepository::new(self.db.pool()).list_wins().await
    }

    async fn upsert_skin_win(&self, win: &NewSkinWin) -> Result<SkinWin> {
        SkinRepository::new(self.db.pool()).upsert_win(win).await
    }

    async fn delete_skin_row(&self, group: i16, hole: i16) -> Result<bool> {
        SkinRepository::new(self.db.pool()).delete(group, hole).await
    }
}

#[derive(Default)]
struct MemoryTables {
    day1: BTreeMap<Day1Key, Day1Score>,
    day2: BTreeMap<Day2Key, Day2Score>,
    skins: BTreeMap<SkinKey, SkinWin>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<MemoryTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn list_day1_scores(&self) -> Result<Vec<Day1Score>> {
        Ok(self.tables.read().await.day1.values().cloned().collect())
    }

    async fn upsert_day1_score(
        &self,
        team: Team,
        hole: i16,
        scramble_strokes: i16,
        alt_shot_strokes: i16,
    ) -> Result<Day1Score> {
        let score = Day1Score {
            team,
            hole,
            scramble_strokes,
            alt_shot_strokes,
            recorded_at: Utc::now().naive_utc(),
        };
        self.tables
            .write()
            .await
            .day1
            .insert(score.key(), score.clone());
        Ok(score)
    }

    async fn list_day2_scores(&self, group: i16) -> Result<Vec<Day2Score>> {
        Ok(self
            .tables
            .read()
            .await
            .day2
            .values()
            .filter(|s| s.group == group)
            .cloned()
            .collect())
    }

    async fn upsert_day2_score(
        &self,
        group: i16,
        hole: i16,
        team: Team,
        strokes: i16,
    ) -> Result<Day2Score> {
        let score = Day2Score {
            group,
            hole,
            team,
            strokes,
            recorded_at: Utc::now().naive_utc(),
        };
        self.tables
            .write()
            .await
            .day2
            .insert(score.key(), score.clone());
        Ok(score)
    }

    async fn list_skin_wins(&self) -> Result<Vec<SkinWin>> {
        Ok(self.tables.read().await.skins.values().cloned().collect())
    }

    async fn upsert_skin_win(&self, win: &NewSkinWin) -> Result<SkinWin> {
        let row = SkinWin {
            group: win.group,
            hole: win.hole,
            winner: win.winner,
            winning_strokes: win.winning_strokes,
            stake_value: win.stake_value,
            recorded_at: Utc::now().naive_utc(),
        };
        self.tables.write().await.skins.insert(row.key(), row.clone());
        Ok(row)
    }

    async fn delete_skin_row(&self, group: i16, hole: i16) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .await
            .skins
            .remove(&SkinKey { group, hole })
            .is_some())
    }
}
