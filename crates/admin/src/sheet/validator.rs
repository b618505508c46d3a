use std::collections::{BTreeMap, HashSet};

use storage::models::{Course, Day1Key, Day2Key, GROUPS, STROKES_RANGE, SkinKey, Team};
use tracing::warn;

use super::models::{FORMAT_VERSION, ScoreSheet};
use crate::{AdminError, Result};

pub struct SheetValidator;

impl SheetValidator {
    pub fn validate(sheet: &ScoreSheet) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if sheet.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                sheet.format_version, FORMAT_VERSION
            ));
        }

        if sheet.day1.is_empty() && sheet.day2.is_empty() {
            report.warnings.push("Sheet contains no scores".to_string());
        }

        let mut day1_keys = HashSet::new();
        let mut day1_holes: BTreeMap<Team, usize> = BTreeMap::new();
        for row in &sheet.day1 {
            let label = format!("Day 1 {} hole {}", row.team, row.hole);

            if !Course::Day1.contains_hole(row.hole) {
                report.errors.push(format!(
                    "{}: hole must be between 1 and {}",
                    label,
                    Course::Day1.hole_count()
                ));
            }
            if !STROKES_RANGE.contains(&row.scramble_strokes) {
                report.errors.push(format!(
                    "{}: scramble strokes {} out of range",
                    label, row.scramble_strokes
                ));
            }
            if !STROKES_RANGE.contains(&row.alt_shot_strokes) {
                report.errors.push(format!(
                    "{}: alternate shot strokes {} out of range",
                    label, row.alt_shot_strokes
                ));
            }
            if !day1_keys.insert(Day1Key {
                team: row.team,
                hole: row.hole,
            }) {
                report.errors.push(format!("{}: duplicate row", label));
            }
            *day1_holes.entry(row.team).or_default() += 1;
        }

        if !sheet.day1.is_empty() {
            for team in Team::ALL {
                let holes = day1_holes.get(&team).copied().unwrap_or(0);
                if holes < Course::Day1.holes().len() {
                    report.warnings.push(format!(
                        "{} has {} of {} Day 1 holes; Day 1 points stay withheld",
                        team,
                        holes,
                        Course::Day1.hole_count()
                    ));
                }
            }
        }

        let mut day2_keys = HashSet::new();
        let mut day2_entries: BTreeMap<SkinKey, usize> = BTreeMap::new();
        for row in &sheet.day2 {
            let label = format!("Day 2 group {} hole {} {}", row.group, row.hole, row.team);

            if !GROUPS.contains(&row.group) {
                report.errors.push(format!(
                    "{}: group must be between {} and {}",
                    label,
                    GROUPS.start(),
                    GROUPS.end()
                ));
            }
            if !Course::Day2.contains_hole(row.hole) {
                report.errors.push(format!(
                    "{}: hole must be between 1 and {}",
                    label,
                    Course::Day2.hole_count()
                ));
            }
            if !STROKES_RANGE.contains(&row.strokes) {
                report
                    .errors
                    .push(format!("{}: strokes {} out of range", label, row.strokes));
            }
            if !day2_keys.insert(Day2Key {
                group: row.group,
                hole: row.hole,
                team: row.team,
            }) {
                report.errors.push(format!("{}: duplicate row", label));
            }
            *day2_entries
                .entry(SkinKey {
                    group: row.group,
                    hole: row.hole,
                })
                .or_default() += 1;
        }

        for (key, count) in &day2_entries {
            if *count < 2 {
                report.warnings.push(format!(
                    "Day 2 group {} hole {} has a single score and will not be settled",
                    key.group, key.hole
                ));
            }
        }

        if !report.errors.is_empty() {
            Err(AdminError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
