use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SkinKey, Team};

/// How a hole was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SkinOutcome {
    Won { team: Team },
    Tied { teams: Vec<Team> },
}

/// Derived result of one Day 2 hole. Never authored directly; rebuilt from
/// the raw score log on every settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkinResult {
    pub group: i16,
    pub hole: i16,
    pub outcome: SkinOutcome,
    pub winning_strokes: i16,
    /// Skins riding on this hole: 1 plus the tied holes carried into it
    pub stake_value: i32,
}

impl SkinResult {
    pub fn key(&self) -> SkinKey {
        SkinKey {
            group: self.group,
            hole: self.hole,
        }
    }

    pub fn winner(&self) -> Option<Team> {
        match self.outcome {
            SkinOutcome::Won { team } => Some(team),
            SkinOutcome::Tied { .. } => None,
        }
    }

    pub fn is_tied(&self) -> bool {
        matches!(self.outcome, SkinOutcome::Tied { .. })
    }

    /// The persisted form of this result, if it is a win.
    pub fn to_win(&self) -> Option<NewSkinWin> {
        self.winner().map(|winner| NewSkinWin {
            group: self.group,
            hole: self.hole,
            winner,
            winning_strokes: self.winning_strokes,
            stake_value: self.stake_value,
        })
    }
}

/// A resolved skin as written to the persisted mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewSkinWin {
    pub group: i16,
    pub hole: i16,
    pub winner: Team,
    pub winning_strokes: i16,
    pub stake_value: i32,
}

/// A persisted skin win row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkinWin {
    pub group: i16,
    pub hole: i16,
    pub winner: Team,
    pub winning_strokes: i16,
    pub stake_value: i32,
    pub recorded_at: NaiveDateTime,
}

impl SkinWin {
    pub fn key(&self) -> SkinKey {
        SkinKey {
            group: self.group,
            hole: self.hole,
        }
    }
}
