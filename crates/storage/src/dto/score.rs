use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Day2Score, HoleInfo, SkinResult, Team};

/// Request payload for recording one Day 1 hole
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordDay1ScoreRequest {
    #[validate(range(min = 1, max = 15, message = "Scramble strokes must be between 1 and 15"))]
    pub scramble_strokes: i16,

    #[validate(range(
        min = 1,
        max = 15,
        message = "Alternate shot strokes must be between 1 and 15"
    ))]
    pub alt_shot_strokes: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TeamStrokes {
    pub team: Team,

    #[validate(range(min = 1, max = 15, message = "Strokes must be between 1 and 15"))]
    pub strokes: i16,
}

/// Request payload for recording a Day 2 hole for one or more teams
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordDay2ScoresRequest {
    #[validate(length(min = 1, max = 3, message = "Between 1 and 3 team scores are required"))]
    #[validate(nested)]
    pub scores: Vec<TeamStrokes>,
}

impl RecordDay2ScoresRequest {
    pub fn validate_unique_teams(&self) -> Result<(), String> {
        let mut seen = Vec::with_capacity(self.scores.len());
        for entry in &self.scores {
            if seen.contains(&entry.team) {
                return Err(format!("Team '{}' appears more than once", entry.team));
            }
            seen.push(entry.team);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct Day1ScoreFilter {
    pub team: Option<Team>,
}

/// One row of a Day 2 group scorecard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScorecardHole {
    pub hole: HoleInfo,
    pub scores: Vec<TeamStrokes>,
    pub skin: Option<SkinResult>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScorecardResponse {
    pub group: i16,
    pub holes: Vec<ScorecardHole>,
}

impl ScorecardResponse {
    pub fn build(group: i16, scores: &[Day2Score], results: &[SkinResult]) -> Self {
        let holes = crate::models::Course::Day2
            .holes()
            .iter()
            .map(|&hole| ScorecardHole {
                hole,
                scores: scores
                    .iter()
                    .filter(|s| s.group == group && s.hole == hole.number)
                    .map(|s| TeamStrokes {
                        team: s.team,
                        strokes: s.strokes,
                    })
                    .collect(),
                skin: results.iter().find(|r| r.hole == hole.number).cloned(),
            })
            .collect();

        Self { group, holes }
    }
}
