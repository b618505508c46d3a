use std::ops::RangeInclusive;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Team;

/// Day 2 groups, each with one player from every team
pub const GROUPS: RangeInclusive<i16> = 1..=5;

/// Bounds accepted for any strokes value at the input boundary
pub const STROKES_RANGE: RangeInclusive<i16> = 1..=15;

/// Unique key of a Day 1 record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day1Key {
    pub team: Team,
    pub hole: i16,
}

/// Unique key of a Day 2 record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day2Key {
    pub group: i16,
    pub hole: i16,
    pub team: Team,
}

/// Unique key of a skin row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkinKey {
    pub group: i16,
    pub hole: i16,
}

/// Scramble and alternate-shot strokes of one team on one hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Day1Score {
    pub team: Team,
    pub hole: i16,
    pub scramble_strokes: i16,
    pub alt_shot_strokes: i16,
    pub recorded_at: NaiveDateTime,
}

impl Day1Score {
    pub fn key(&self) -> Day1Key {
        Day1Key {
            team: self.team,
            hole: self.hole,
        }
    }

    /// A hole counts towards completion once both formats have a score.
    pub fn is_complete(&self) -> bool {
        self.scramble_strokes > 0 && self.alt_shot_strokes > 0
    }
}

/// Strokes of one team's player on one hole of a Day 2 group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Day2Score {
    pub group: i16,
    pub hole: i16,
    pub team: Team,
    pub strokes: i16,
    pub recorded_at: NaiveDateTime,
}

impl Day2Score {
    pub fn key(&self) -> Day2Key {
        Day2Key {
            group: self.group,
            hole: self.hole,
            team: self.team,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.strokes > 0
    }
}
