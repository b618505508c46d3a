use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::{Course, Day2Key, Day2Score, GROUPS, SkinOutcome, SkinResult, Team};
use crate::store::ScoreStore;

/// Settles every hole of a Day 2 group from its raw score log.
///
/// Holes are walked in order with a running stake that starts at 1. A hole
/// with fewer than two valid (positive) scores is not yet played: it yields
/// no result and leaves the running stake untouched, so a tie before the gap
/// still carries into the next played hole. A strictly lowest score wins the
/// running stake and resets it to 1; a shared lowest score records a tie and
/// adds one skin to the stake of the next played hole.
///
/// The output only depends on the set of records, not on their order. When a
/// key appears more than once the most recently recorded value is used.
pub fn settle(group: i16, scores: &[Day2Score]) -> Vec<SkinResult> {
    let mut latest: BTreeMap<Day2Key, &Day2Score> = BTreeMap::new();
    for score in scores.iter().filter(|s| s.group == group) {
        latest
            .entry(score.key())
            .and_modify(|current| {
                if (score.recorded_at, score.strokes) > (current.recorded_at, current.strokes) {
                    *current = score;
                }
            })
            .or_insert(score);
    }

    let mut results = Vec::new();
    let mut stake_carry = 1;

    for hole in 1..=Course::Day2.hole_count() {
        let valid: Vec<(Team, i16)> = Team::ALL
            .iter()
            .filter_map(|&team| {
                latest
                    .get(&Day2Key { group, hole, team })
                    .filter(|s| s.is_valid())
                    .map(|s| (team, s.strokes))
            })
            .collect();

        if valid.len() < 2 {
            continue;
        }

        let Some(winning_strokes) = valid.iter().map(|&(_, strokes)| strokes).min() else {
            continue;
        };
        let leaders: Vec<Team> = valid
            .iter()
            .filter(|&&(_, strokes)| strokes == winning_strokes)
            .map(|&(team, _)| team)
            .collect();

        let (outcome, next_carry) = if leaders.len() == 1 {
            (SkinOutcome::Won { team: leaders[0] }, 1)
        } else {
            (SkinOutcome::Tied { teams: leaders }, stake_carry + 1)
        };

        results.push(SkinResult {
            group,
            hole,
            outcome,
            winning_strokes,
            stake_value: stake_carry,
        });
        stake_carry = next_carry;
    }

    results
}

/// Skins won per team. Every team is present, with zero if it won nothing.
pub fn team_points<'a>(results: impl IntoIterator<Item = &'a SkinResult>) -> BTreeMap<Team, i32> {
    let mut points: BTreeMap<Team, i32> = Team::ALL.iter().map(|&t| (t, 0)).collect();
    for result in results {
        if let Some(team) = result.winner() {
            *points.entry(team).or_default() += result.stake_value;
        }
    }
    points
}

/// A hole whose mirror row could not be written
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersistFailure {
    pub group: i16,
    pub hole: i16,
    pub message: String,
}

/// Outcome of a full recompute of one group
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupSettlement {
    pub group: i16,
    pub results: Vec<SkinResult>,
    pub persist_failures: Vec<PersistFailure>,
}

impl GroupSettlement {
    pub fn points(&self) -> BTreeMap<Team, i32> {
        team_points(&self.results)
    }

    pub fn result_for(&self, hole: i16) -> Option<&SkinResult> {
        self.results.iter().find(|r| r.hole == hole)
    }
}

/// Recomputes a group from the stored score log and brings the persisted
/// mirror of wins in line with it.
///
/// Failed writes are logged and returned in `persist_failures`; the
/// remaining holes are still written. The returned results are authoritative
/// either way, and the next settlement repairs the mirror.
pub async fn settle_group<S>(store: &S, group: i16) -> Result<GroupSettlement>
where
    S: ScoreStore + ?Sized,
{
    let scores = store.list_day2_scores(group).await?;
    let results = settle(group, &scores);

    let mirrored: Option<HashSet<i16>> = match store.list_skin_wins().await {
        Ok(wins) => Some(
            wins.into_iter()
                .filter(|w| w.group == group)
                .map(|w| w.hole)
                .collect(),
        ),
        Err(e) => {
            tracing::warn!("Could not read skin mirror for group {}: {}", group, e);
            None
        }
    };

    let mut persist_failures = Vec::new();

    for hole in 1..=Course::Day2.hole_count() {
        let win = results
            .iter()
            .find(|r| r.hole == hole)
            .and_then(SkinResult::to_win);

        let outcome = match win {
            Some(win) => store.upsert_skin_win(&win).await.map(|_| ()),
            None if mirrored.as_ref().is_none_or(|holes| holes.contains(&hole)) => {
                store.delete_skin_row(group, hole).await.map(|_| ())
            }
            None => Ok(()),
        };

        if let Err(e) = outcome {
            tracing::warn!(
                "Failed to persist skin for group {} hole {}: {}",
                group,
                hole,
                e
            );
            persist_failures.push(PersistFailure {
                group,
                hole,
                message: e.to_string(),
            });
        }
    }

    tracing::info!(
        "Settled group {}: {} hole(s) resolved, {} persistence failure(s)",
        group,
        results.len(),
        persist_failures.len()
    );

    Ok(GroupSettlement {
        group,
        results,
        persist_failures,
    })
}

/// Recomputes every group.
pub async fn settle_all<S>(store: &S) -> Result<Vec<GroupSettlement>>
where
    S: ScoreStore + ?Sized,
{
    let mut settlements = Vec::new();
    for group in GROUPS {
        settlements.push(settle_group(store, group).await?);
    }
    Ok(settlements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::models::{Day1Score, NewSkinWin, SkinWin};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDateTime};

    fn at(seconds: i64) -> NaiveDateTime {
        DateTime::from_timestamp(seconds, 0).unwrap().naive_utc()
    }

    fn hole_scores(group: i16, hole: i16, strokes: [i16; 3]) -> Vec<Day2Score> {
        Team::ALL
            .iter()
            .zip(strokes)
            .map(|(&team, strokes)| Day2Score {
                group,
                hole,
                team,
                strokes,
                recorded_at: at(i64::from(hole)),
            })
            .collect()
    }

    fn card(group: i16, holes: &[[i16; 3]]) -> Vec<Day2Score> {
        holes
            .iter()
            .enumerate()
            .flat_map(|(idx, strokes)| hole_scores(group, idx as i16 + 1, *strokes))
            .collect()
    }

    /// Stake recomputed by looking back over the preceding results.
    fn looked_back_stake(results: &[SkinResult], idx: usize) -> i32 {
        1 + results[..idx]
            .iter()
            .rev()
            .take_while(|r| r.is_tied())
            .count() as i32
    }

    #[test]
    fn test_ties_carry_into_outright_win() {
        let results = settle(1, &card(1, &[[4, 4, 5], [3, 3, 3], [2, 5, 5]]));

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].outcome,
            SkinOutcome::Tied {
                teams: vec![Team::YoungGuns, Team::OGs]
            }
        );
        assert_eq!(results[0].stake_value, 1);
        assert_eq!(
            results[1].outcome,
            SkinOutcome::Tied {
                teams: Team::ALL.to_vec()
            }
        );
        assert_eq!(results[1].stake_value, 2);
        assert_eq!(results[2].winner(), Some(Team::YoungGuns));
        assert_eq!(results[2].winning_strokes, 2);
        assert_eq!(results[2].stake_value, 3);

        let points = team_points(&results);
        assert_eq!(points[&Team::YoungGuns], 3);
        assert_eq!(points[&Team::OGs], 0);
        assert_eq!(points[&Team::Mids], 0);
    }

    #[test]
    fn test_single_valid_score_produces_no_result() {
        let mut scores = hole_scores(1, 1, [3, 0, 0]);
        scores.retain(|s| s.team != Team::Mids);

        assert!(settle(1, &scores).is_empty());
    }

    #[test]
    fn test_two_valid_scores_are_enough() {
        let scores = hole_scores(1, 1, [5, 0, 4]);
        let results = settle(1, &scores);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].winner(), Some(Team::Mids));
    }

    #[test]
    fn test_unplayed_hole_preserves_carry() {
        let mut scores = card(1, &[[4, 4, 5]]);
        scores.extend(hole_scores(1, 2, [4, 0, 0]));
        scores.extend(hole_scores(1, 3, [5, 3, 4]));

        let results = settle(1, &scores);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].hole, 1);
        assert!(results[0].is_tied());
        assert_eq!(results[1].hole, 3);
        assert_eq!(results[1].winner(), Some(Team::OGs));
        assert_eq!(results[1].stake_value, 2);
    }

    #[test]
    fn test_fully_played_group_distributes_nine_skins() {
        let holes = [
            [4, 4, 4],
            [3, 4, 5],
            [5, 5, 6],
            [4, 4, 5],
            [6, 5, 4],
            [3, 3, 4],
            [4, 5, 5],
            [5, 5, 5],
            [4, 3, 5],
        ];
        let results = settle(3, &card(3, &holes));

        assert_eq!(results.len(), 9);
        let total: i32 = team_points(&results).values().sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn test_trailing_ties_hold_unpaid_skins() {
        let results = settle(1, &card(1, &[[3, 4, 5], [4, 4, 5], [5, 5, 5]]));

        let paid: i32 = team_points(&results).values().sum();
        let trailing_ties = results.iter().rev().take_while(|r| r.is_tied()).count() as i32;

        assert_eq!(paid, 1);
        assert_eq!(paid + trailing_ties, results.len() as i32);
    }

    #[test]
    fn test_stake_matches_lookback_over_preceding_ties() {
        let holes = [
            [4, 4, 5],
            [3, 3, 3],
            [2, 5, 5],
            [4, 3, 3],
            [5, 6, 7],
            [4, 4, 4],
            [4, 4, 4],
            [4, 4, 4],
            [6, 5, 6],
        ];
        let results = settle(2, &card(2, &holes));

        for idx in 0..results.len() {
            assert_eq!(results[idx].stake_value, looked_back_stake(&results, idx));
        }
        assert_eq!(results[8].stake_value, 4);
    }

    #[test]
    fn test_settlement_is_independent_of_input_order() {
        let holes = [[4, 4, 5], [3, 4, 3], [2, 5, 5], [4, 4, 4], [5, 4, 6]];
        let scores = card(4, &holes);
        let mut reversed = scores.clone();
        reversed.reverse();

        let first = settle(4, &scores);
        assert_eq!(first, settle(4, &scores));
        assert_eq!(first, settle(4, &reversed));
    }

    #[test]
    fn test_latest_record_wins_for_duplicate_keys() {
        let mut scores = card(1, &[[4, 5, 6]]);
        scores.push(Day2Score {
            group: 1,
            hole: 1,
            team: Team::YoungGuns,
            strokes: 7,
            recorded_at: at(100),
        });

        let results = settle(1, &scores);
        assert_eq!(results[0].winner(), Some(Team::OGs));
    }

    #[test]
    fn test_other_groups_are_ignored() {
        let mut scores = card(1, &[[4, 5, 6]]);
        scores.extend(card(2, &[[6, 5, 4], [3, 4, 5]]));

        let results = settle(1, &scores);
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|r| r.group == 1));
    }

    async fn record(store: &MemoryStore, group: i16, hole: i16, strokes: [i16; 3]) {
        for (&team, strokes) in Team::ALL.iter().zip(strokes) {
            store
                .upsert_day2_score(group, hole, team, strokes)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_retroactive_edit_changes_downstream_stake() {
        let store = MemoryStore::new();
        record(&store, 1, 1, [4, 4, 5]).await;
        record(&store, 1, 2, [3, 4, 5]).await;
        record(&store, 1, 3, [5, 4, 5]).await;

        let before = settle_group(&store, 1).await.unwrap();
        assert_eq!(before.result_for(2).map(|r| r.stake_value), Some(2));
        assert_eq!(before.points()[&Team::YoungGuns], 2);

        store.upsert_day2_score(1, 1, Team::OGs, 5).await.unwrap();
        let after = settle_group(&store, 1).await.unwrap();

        assert_eq!(after.result_for(1).and_then(|r| r.winner()), Some(Team::YoungGuns));
        assert_eq!(after.result_for(2).map(|r| r.stake_value), Some(1));
        assert_eq!(after.points()[&Team::YoungGuns], 2);
        assert_eq!(after.points()[&Team::OGs], 1);

        let mirror = store.list_skin_wins().await.unwrap();
        let hole2 = mirror.iter().find(|w| w.hole == 2).unwrap();
        assert_eq!(hole2.stake_value, 1);
        assert_eq!(mirror.len(), 3);
    }

    #[tokio::test]
    async fn test_win_turned_tie_removes_mirror_row() {
        let store = MemoryStore::new();
        record(&store, 2, 1, [3, 4, 5]).await;
        settle_group(&store, 2).await.unwrap();
        assert_eq!(store.list_skin_wins().await.unwrap().len(), 1);

        store.upsert_day2_score(2, 1, Team::OGs, 3).await.unwrap();
        let settlement = settle_group(&store, 2).await.unwrap();

        assert!(settlement.result_for(1).unwrap().is_tied());
        assert!(store.list_skin_wins().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resettlement_is_idempotent() {
        let store = MemoryStore::new();
        record(&store, 5, 1, [4, 4, 5]).await;
        record(&store, 5, 2, [3, 4, 4]).await;

        let first = settle_group(&store, 5).await.unwrap();
        let mirror_first: Vec<_> = store
            .list_skin_wins()
            .await
            .unwrap()
            .into_iter()
            .map(|w| (w.group, w.hole, w.winner, w.stake_value))
            .collect();
        let second = settle_group(&store, 5).await.unwrap();
        let mirror_second: Vec<_> = store
            .list_skin_wins()
            .await
            .unwrap()
            .into_iter()
            .map(|w| (w.group, w.hole, w.winner, w.stake_value))
            .collect();

        assert_eq!(first.results, second.results);
        assert_eq!(mirror_first, mirror_second);
    }

    /// Store whose skin writes fail for selected holes
    struct FlakyStore {
        inner: MemoryStore,
        failing_holes: Vec<i16>,
    }

    #[async_trait]
    impl ScoreStore for FlakyStore {
        async fn list_day1_scores(&self) -> Result<Vec<Day1Score>> {
            self.inner.list_day1_scores().await
        }

        async fn upsert_day1_score(
            &self,
            team: Team,
            hole: i16,
            scramble_strokes: i16,
            alt_shot_strokes: i16,
        ) -> Result<Day1Score> {
            self.inner
                .upsert_day1_score(team, hole, scramble_strokes, alt_shot_strokes)
                .await
        }

        async fn list_day2_scores(&self, group: i16) -> Result<Vec<Day2Score>> {
            self.inner.list_day2_scores(group).await
        }

        async fn upsert_day2_score(
            &self,
            group: i16,
            hole: i16,
            team: Team,
            strokes: i16,
        ) -> Result<Day2Score> {
            self.inner.upsert_day2_score(group, hole, team, strokes).await
        }

        async fn list_skin_wins(&self) -> Result<Vec<SkinWin>> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        async fn upsert_skin_win(&self, win: &NewSkinWin) -> Result<SkinWin> {
            if self.failing_holes.contains(&win.hole) {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            self.inner.upsert_skin_win(win).await
        }

        async fn delete_skin_row(&self, group: i16, hole: i16) -> Result<bool> {
            self.inner.delete_skin_row(group, hole).await
        }
    }

    #[tokio::test]
    async fn test_persist_failure_does_not_abort_settlement() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failing_holes: vec![2],
        };
        for (hole, strokes) in [[3, 4, 5], [4, 3, 5], [5, 4, 3]].into_iter().enumerate() {
            for (&team, s) in Team::ALL.iter().zip(strokes) {
                store
                    .upsert_day2_score(1, hole as i16 + 1, team, s)
                    .await
                    .unwrap();
            }
        }

        let settlement = settle_group(&store, 1).await.unwrap();

        assert_eq!(settlement.results.len(), 3);
        assert_eq!(settlement.persist_failures.len(), 1);
        assert_eq!(settlement.persist_failures[0].hole, 2);

        let mirrored: Vec<i16> = store
            .inner
            .list_skin_wins()
            .await
            .unwrap()
            .iter()
            .map(|w| w.hole)
            .collect();
        assert_eq!(mirrored, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_settle_all_covers_every_group() {
        let store = MemoryStore::new();
        record(&store, 1, 1, [3, 4, 5]).await;
        record(&store, 5, 9, [5, 4, 5]).await;

        let settlements = settle_all(&store).await.unwrap();

        assert_eq!(settlements.len(), 5);
        assert_eq!(settlements[0].results.len(), 1);
        assert_eq!(settlements[4].results[0].hole, 9);
        assert!(settlements[1..4].iter().all(|s| s.results.is_empty()));
    }
}
