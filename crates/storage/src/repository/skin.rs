use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::{NewSkinWin, SkinWin, Team};

#[derive(FromRow)]
struct SkinWinRow {
    group_number: i16,
    hole: i16,
    winner: String,
    winning_strokes: i16,
    stake_value: i32,
    recorded_at: NaiveDateTime,
}

impl TryFrom<SkinWinRow> for SkinWin {
    type Error = crate::error::StorageError;

    fn try_from(row: SkinWinRow) -> Result<Self> {
        Ok(Self {
            group: row.group_number,
            hole: row.hole,
            winner: row.winner.parse::<Team>()?,
            winning_strokes: row.winning_strokes,
            stake_value: row.stake_value,
            recorded_at: row.recorded_at,
        })
    }
}

/// Repository for the persisted mirror of resolved skins
pub struct SkinRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SkinRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_wins(&self) -> Result<Vec<SkinWin>> {
        let rows: Vec<SkinWinRow> = sqlx::query_as(
            r#"
            SELECT group_number, hole, winner, winning_strokes, stake_value, recorded_at
            FROM skin_wins
            ORDER BY group_number, hole
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SkinWin::try_from).collect()
    }

    pub async fn upsert_win(&self, win: &NewSkinWin) -> Result<SkinWin> {
        let row: SkinWinRow = sqlx::query_as(
            r#"
            INSERT INTO skin_wins (group_number, hole, winner, winning_strokes, stake_value)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (group_number, hole)
            DO UPDATE SET
                winner = EXCLUDED.winner,
                winning_strokes = EXCLUDED.winning_strokes,
                stake_value = EXCLUDED.stake_value,
                recorded_at = CURRENT_TIMESTAMP
            RETURNING group_number, hole, winner, winning_strokes, stake_value, recorded_at
            "#,
        )
        .bind(win.group)
        .bind(win.hole)
        .bind(win.winner.slug())
        .bind(win.winning_strokes)
        .bind(win.stake_value)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Remove the row for a hole. Returns whether a row existed.
    pub async fn delete(&self, group: i16, hole: i16) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM skin_wins
            WHERE group_number = $1 AND hole = $2
            "#,
        )
        .bind(group)
        .bind(hole)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
