use storage::{
    ScoreStore,
    models::GROUPS,
    services::skins::{GroupSettlement, settle_all},
};

use super::models::{Day1Row, Day2Row, ScoreSheet};
use crate::Result;

#[derive(Debug)]
pub struct ImportSummary {
    pub day1_rows: usize,
    pub day2_rows: usize,
    pub settlements: Vec<GroupSettlement>,
}

/// Moves score sheets in and out of a store
pub struct SheetLoader<'a, S: ScoreStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ScoreStore + ?Sized> SheetLoader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Upserts every row, then settles every group. The sheet must have been
    /// validated first.
    pub async fn import(&self, sheet: &ScoreSheet) -> Result<ImportSummary> {
        for row in &sheet.day1 {
            self.store
                .upsert_day1_score(
                    row.team,
                    row.hole,
                    row.scramble_strokes,
                    row.alt_shot_strokes,
                )
                .await?;
        }
        tracing::info!("Imported {} Day 1 row(s)", sheet.day1.len());

        for row in &sheet.day2 {
            self.store
                .upsert_day2_score(row.group, row.hole, row.team, row.strokes)
                .await?;
        }
        tracing::info!("Imported {} Day 2 row(s)", sheet.day2.len());

        let settlements = settle_all(self.store).await?;

        Ok(ImportSummary {
            day1_rows: sheet.day1.len(),
            day2_rows: sheet.day2.len(),
            settlements,
        })
    }

    pub async fn export(&self) -> Result<ScoreSheet> {
        let day1 = self
            .store
            .list_day1_scores()
            .await?
            .into_iter()
            .map(|s| Day1Row {
                team: s.team,
                hole: s.hole,
                scramble_strokes: s.scramble_strokes,
                alt_shot_strokes: s.alt_shot_strokes,
            })
            .collect();

        let mut day2 = Vec::new();
        for group in GROUPS {
            day2.extend(
                self.store
                    .list_day2_scores(group)
                    .await?
                    .into_iter()
                    .map(|s| Day2Row {
                        group: s.group,
                        hole: s.hole,
                        team: s.team,
                        strokes: s.strokes,
                    }),
            );
        }

        Ok(ScoreSheet::new(day1, day2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::models::FORMAT_VERSION;
    use storage::{MemoryStore, models::Team};

    fn sample_sheet() -> ScoreSheet {
        ScoreSheet {
            format_version: FORMAT_VERSION.to_string(),
            exported_at: None,
            day1: vec![Day1Row {
                team: Team::OGs,
                hole: 1,
                scramble_strokes: 4,
                alt_shot_strokes: 5,
            }],
            day2: vec![
                Day2Row {
                    group: 3,
                    hole: 1,
                    team: Team::OGs,
                    strokes: 4,
                },
                Day2Row {
                    group: 3,
                    hole: 1,
                    team: Team::Mids,
                    strokes: 3,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_import_settles_groups() {
        let store = MemoryStore::new();
        let loader = SheetLoader::new(&store);

        let summary = loader.import(&sample_sheet()).await.unwrap();

        assert_eq!(summary.day1_rows, 1);
        assert_eq!(summary.day2_rows, 2);
        assert_eq!(summary.settlements.len(), 5);
        assert_eq!(
            summary.settlements[2].results[0].winner(),
            Some(Team::Mids)
        );
        assert_eq!(store.list_skin_wins().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_export_returns_imported_rows() {
        let store = MemoryStore::new();
        let loader = SheetLoader::new(&store);
        loader.import(&sample_sheet()).await.unwrap();

        let exported = loader.export().await.unwrap();

        assert_eq!(exported.format_version, FORMAT_VERSION);
        assert_eq!(exported.day1, sample_sheet().day1);
        assert_eq!(exported.day2.len(), 2);
        assert!(exported.day2.iter().all(|r| r.group == 3));
    }
}
