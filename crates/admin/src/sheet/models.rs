use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::models::Team;

pub const FORMAT_VERSION: &str = "1.0.0";

/// Portable dump of the raw score log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub day1: Vec<Day1Row>,
    #[serde(default)]
    pub day2: Vec<Day2Row>,
}

impl ScoreSheet {
    pub fn new(day1: Vec<Day1Row>, day2: Vec<Day2Row>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            exported_at: Some(Utc::now()),
            day1,
            day2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day1Row {
    pub team: Team,
    pub hole: i16,
    pub scramble_strokes: i16,
    pub alt_shot_strokes: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day2Row {
    pub group: i16,
    pub hole: i16,
    pub team: Team,
    pub strokes: i16,
}
