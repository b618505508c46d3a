use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::day1_points::{Day1Award, Day1Tally, award_points};
use super::skins::{settle, team_points};
use crate::dto::leaderboard::{GroupProgress, Leaderboard, LeaderboardEntry};
use crate::error::Result;
use crate::models::{Course, GROUPS, SkinResult, Team};
use crate::store::ScoreStore;

/// Combines Day 1 awards and Day 2 skins into ranked standings.
///
/// Entries are ordered by total points, highest first, with team order
/// breaking ties. Teams on equal totals share a rank.
pub fn compose(
    tally: &Day1Tally,
    award: &Day1Award,
    skin_results: &[SkinResult],
) -> Vec<LeaderboardEntry> {
    let day2_points = team_points(skin_results);
    let mut skins_won: BTreeMap<Team, i32> = BTreeMap::new();
    for team in skin_results.iter().filter_map(SkinResult::winner) {
        *skins_won.entry(team).or_default() += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = Team::ALL
        .iter()
        .map(|&team| {
            let scramble = award.scramble.get(&team).copied().unwrap_or_default();
            let alt_shot = award.alt_shot.get(&team).copied().unwrap_or_default();
            let day2 = day2_points.get(&team).copied().unwrap_or(0);

            LeaderboardEntry {
                rank: 0,
                team,
                team_name: team.display_name().to_string(),
                total_points: scramble + alt_shot + Decimal::from(day2),
                day1_scramble_points: scramble,
                day1_alt_shot_points: alt_shot,
                day2_points: day2,
                day1_holes_completed: tally.holes_completed(team),
                skins_won: skins_won.get(&team).copied().unwrap_or(0),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team.cmp(&b.team))
    });

    let mut previous: Option<Decimal> = None;
    let mut rank = 0;
    for (idx, entry) in entries.iter_mut().enumerate() {
        if previous != Some(entry.total_points) {
            rank = idx as i64 + 1;
            previous = Some(entry.total_points);
        }
        entry.rank = rank;
    }

    entries
}

/// Standings recomputed from the raw score log. The persisted skin mirror is
/// not consulted.
pub async fn leaderboard<S>(store: &S) -> Result<Leaderboard>
where
    S: ScoreStore + ?Sized,
{
    let day1_scores = store.list_day1_scores().await?;
    let tally = Day1Tally::from_scores(&day1_scores);
    let award = award_points(&tally);

    let mut skin_results = Vec::new();
    let mut groups = Vec::new();
    for group in GROUPS {
        let scores = store.list_day2_scores(group).await?;
        let results = settle(group, &scores);
        groups.push(GroupProgress {
            group,
            holes_resolved: results.len() as i32,
            holes_total: i32::from(Course::Day2.hole_count()),
            carried_skins: results.iter().rev().take_while(|r| r.is_tied()).count() as i32,
        });
        skin_results.extend(results);
    }

    tracing::debug!(
        "Leaderboard recomputed: day1 released = {}, {} skin result(s)",
        award.released,
        skin_results.len()
    );

    Ok(Leaderboard {
        entries: compose(&tally, &award, &skin_results),
        day1_released: award.released,
        groups,
    })
}
