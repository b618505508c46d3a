use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::{Day2Score, Team};

#[derive(FromRow)]
struct Day2ScoreRow {
    group_number: i16,
    hole: i16,
    team: String,
    strokes: i16,
    recorded_at: NaiveDateTime,
}

impl TryFrom<Day2ScoreRow> for Day2Score {
    type Error = crate::error::StorageError;

    fn try_from(row: Day2ScoreRow) -> Result<Self> {
        Ok(Self {
            group: row.group_number,
            hole: row.hole,
            team: row.team.parse::<Team>()?,
            strokes: row.strokes,
            recorded_at: row.recorded_at,
        })
    }
}

/// Repository for the Day 2 score log
pub struct Day2ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> Day2ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the records of one group, ordered by hole
    pub async fn list_for_group(&self, group: i16) -> Result<Vec<Day2Score>> {
        let rows: Vec<Day2ScoreRow> = sqlx::query_as(
            r#"
            SELECT group_number, hole, team, strokes, recorded_at
            FROM day2_scores
            WHERE group_number = $1
            ORDER BY hole, team
            "#,
        )
        .bind(group)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Day2Score::try_from).collect()
    }

    /// Insert or replace the record keyed by (group, hole, team)
    pub async fn upsert(
        &self,
        group: i16,
        hole: i16,
        team: Team,
        strokes: i16,
    ) -> Result<Day2Score> {
        let row: Day2ScoreRow = sqlx::query_as(
            r#"
            INSERT INTO day2_scores (group_number, hole, team, strokes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (group_number, hole, team)
            DO UPDATE SET
                strokes = EXCLUDED.strokes,
                recorded_at = CURRENT_TIMESTAMP
            RETURNING group_number, hole, team, strokes, recorded_at
            "#,
        )
        .bind(group)
        .bind(hole)
        .bind(team.slug())
        .bind(strokes)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
