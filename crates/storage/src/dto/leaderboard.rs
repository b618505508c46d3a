use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Team;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub team: Team,
    pub team_name: String,
    pub total_points: Decimal,
    pub day1_scramble_points: Decimal,
    pub day1_alt_shot_points: Decimal,
    pub day2_points: i32,
    pub day1_holes_completed: i32,
    pub skins_won: i32,
}

/// Day 2 progress of one group
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupProgress {
    pub group: i16,
    pub holes_resolved: i32,
    pub holes_total: i32,
    /// Tied holes at the end of the card whose skins are still riding
    pub carried_skins: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    /// False until every team has finished Day 1
    pub day1_released: bool,
    pub groups: Vec<GroupProgress>,
}
