use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::{Day1Score, Team};

#[derive(FromRow)]
struct Day1ScoreRow {
    team: String,
    hole: i16,
    scramble_strokes: i16,
    alt_shot_strokes: i16,
    recorded_at: NaiveDateTime,
}

impl TryFrom<Day1ScoreRow> for Day1Score {
    type Error = crate::error::StorageError;

    fn try_from(row: Day1ScoreRow) -> Result<Self> {
        Ok(Self {
            team: row.team.parse::<Team>()?,
            hole: row.hole,
            scramble_strokes: row.scramble_strokes,
            alt_shot_strokes: row.alt_shot_strokes,
            recorded_at: row.recorded_at,
        })
    }
}

/// Repository for the Day 1 score log
pub struct Day1ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> Day1ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every Day 1 record, ordered by team then hole
    pub async fn list(&self) -> Result<Vec<Day1Score>> {
        let rows: Vec<Day1ScoreRow> = sqlx::query_as(
            r#"
            SELECT team, hole, scramble_strokes, alt_shot_strokes, recorded_at
            FROM day1_scores
            ORDER BY team, hole
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Day1Score::try_from).collect()
    }

    /// Insert or replace the record keyed by (team, hole)
    pub async fn upsert(
        &self,
        team: Team,
        hole: i16,
        scramble_strokes: i16,
        alt_shot_strokes: i16,
    ) -> Result<Day1Score> {
        let row: Day1ScoreRow = sqlx::query_as(
            r#"
            INSERT INTO day1_scores (team, hole, scramble_strokes, alt_shot_strokes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (team, hole)
            DO UPDATE SET
                scramble_strokes = EXCLUDED.scramble_strokes,
                alt_shot_strokes = EXCLUDED.alt_shot_strokes,
                recorded_at = CURRENT_TIMESTAMP
            RETURNING team, hole, scramble_strokes, alt_shot_strokes, recorded_at
            "#,
        )
        .bind(team.slug())
        .bind(hole)
        .bind(scramble_strokes)
        .bind(alt_shot_strokes)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
