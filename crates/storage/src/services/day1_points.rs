use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Course, Day1Score, Team};

/// Points for first, second and third place in one Day 1 format
pub fn point_pool() -> [Decimal; 3] {
    [Decimal::from(11), Decimal::new(75, 1), Decimal::from(4)]
}

/// Running totals of one team over the Day 1 log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Day1TeamTotals {
    pub scramble_strokes: i32,
    pub alt_shot_strokes: i32,
    pub holes_completed: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Day1Tally {
    pub totals: BTreeMap<Team, Day1TeamTotals>,
}

impl Day1Tally {
    /// Only holes with both formats recorded are counted.
    pub fn from_scores<'a>(scores: impl IntoIterator<Item = &'a Day1Score>) -> Self {
        let mut totals: BTreeMap<Team, Day1TeamTotals> = Team::ALL
            .iter()
            .map(|&t| (t, Day1TeamTotals::default()))
            .collect();

        for score in scores {
            if !score.is_complete() || !Course::Day1.contains_hole(score.hole) {
                continue;
            }
            let entry = totals.entry(score.team).or_default();
            entry.scramble_strokes += i32::from(score.scramble_strokes);
            entry.alt_shot_strokes += i32::from(score.alt_shot_strokes);
            entry.holes_completed += 1;
        }

        Self { totals }
    }

    pub fn holes_completed(&self, team: Team) -> i32 {
        self.totals
            .get(&team)
            .map(|t| t.holes_completed)
            .unwrap_or(0)
    }

    /// True once every team has a score on every hole.
    pub fn is_complete(&self) -> bool {
        Team::ALL
            .iter()
            .all(|&t| self.holes_completed(t) >= i32::from(Course::Day1.hole_count()))
    }
}

/// Splits a ranked point pool by total strokes, lowest first.
///
/// Teams sharing a total share the pool places they span: a tie over
/// places `i..=j` divides `pool[i] + ... + pool[j]` equally.
pub fn split_points(totals: &BTreeMap<Team, i32>, pool: &[Decimal]) -> BTreeMap<Team, Decimal> {
    let mut ranked: Vec<(Team, i32)> = totals.iter().map(|(&t, &s)| (t, s)).collect();
    ranked.sort_by_key(|&(team, strokes)| (strokes, team));

    let mut points = BTreeMap::new();
    let mut start = 0;

    while start < ranked.len() {
        let strokes = ranked[start].1;
        let end = ranked[start..]
            .iter()
            .take_while(|&&(_, s)| s == strokes)
            .count()
            + start;

        let share: Decimal = (start..end)
            .map(|place| pool.get(place).copied().unwrap_or(Decimal::ZERO))
            .sum();
        let each = share / Decimal::from(end - start);

        for &(team, _) in &ranked[start..end] {
            points.insert(team, each);
        }

        start = end;
    }

    points
}

/// Day 1 points per format. Both maps are empty until every team has
/// finished all 18 holes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Day1Award {
    pub released: bool,
    pub scramble: BTreeMap<Team, Decimal>,
    pub alt_shot: BTreeMap<Team, Decimal>,
}

impl Day1Award {
    pub fn total_for(&self, team: Team) -> Decimal {
        self.scramble.get(&team).copied().unwrap_or_default()
            + self.alt_shot.get(&team).copied().unwrap_or_default()
    }
}

pub fn award_points(tally: &Day1Tally) -> Day1Award {
    if !tally.is_complete() {
        return Day1Award::default();
    }

    let pool = point_pool();
    let scramble: BTreeMap<Team, i32> = tally
        .totals
        .iter()
        .map(|(&t, totals)| (t, totals.scramble_strokes))
        .collect();
    let alt_shot: BTreeMap<Team, i32> = tally
        .totals
        .iter()
        .map(|(&t, totals)| (t, totals.alt_shot_strokes))
        .collect();

    Day1Award {
        released: true,
        scramble: split_points(&scramble, &pool),
        alt_shot: split_points(&alt_shot, &pool),
    }
}
