use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Par and yardage of a single hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HoleInfo {
    pub number: i16,
    pub par: i16,
    pub yardage: i32,
}

const fn hole(number: i16, par: i16, yardage: i32) -> HoleInfo {
    HoleInfo {
        number,
        par,
        yardage,
    }
}

const DAY1_HOLES: [HoleInfo; 18] = [
    hole(1, 4, 388),
    hole(2, 5, 521),
    hole(3, 3, 167),
    hole(4, 4, 402),
    hole(5, 4, 365),
    hole(6, 3, 184),
    hole(7, 5, 548),
    hole(8, 4, 419),
    hole(9, 4, 376),
    hole(10, 4, 395),
    hole(11, 3, 152),
    hole(12, 5, 533),
    hole(13, 4, 410),
    hole(14, 4, 342),
    hole(15, 3, 201),
    hole(16, 5, 507),
    hole(17, 4, 384),
    hole(18, 4, 427),
];

const DAY2_HOLES: [HoleInfo; 9] = [
    hole(1, 4, 356),
    hole(2, 3, 148),
    hole(3, 5, 492),
    hole(4, 4, 371),
    hole(5, 4, 338),
    hole(6, 3, 176),
    hole(7, 4, 402),
    hole(8, 5, 515),
    hole(9, 4, 389),
];

/// The two fixed courses of the tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    /// Scramble and alternate shot, 18 holes
    Day1,
    /// Skins, 9 holes
    Day2,
}

impl Course {
    pub fn holes(&self) -> &'static [HoleInfo] {
        match self {
            Self::Day1 => &DAY1_HOLES,
            Self::Day2 => &DAY2_HOLES,
        }
    }

    pub fn hole(&self, number: i16) -> Option<HoleInfo> {
        self.holes().iter().find(|h| h.number == number).copied()
    }

    pub fn hole_count(&self) -> i16 {
        self.holes().len() as i16
    }

    pub fn total_par(&self) -> i32 {
        self.holes().iter().map(|h| i32::from(h.par)).sum()
    }

    pub fn total_yardage(&self) -> i32 {
        self.holes().iter().map(|h| h.yardage).sum()
    }

    pub fn contains_hole(&self, number: i16) -> bool {
        (1..=self.hole_count()).contains(&number)
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day1" | "1" => Ok(Self::Day1),
            "day2" | "2" => Ok(Self::Day2),
            other => Err(format!("unknown course '{}'", other)),
        }
    }
}

/// Strokes relative to par, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToPar(pub i32);

impl ToPar {
    pub fn new(strokes: i32, par: i32) -> Self {
        Self(strokes - par)
    }
}

impl fmt::Display for ToPar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("E"),
            n if n > 0 => write!(f, "+{}", n),
            n => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_sizes() {
        assert_eq!(Course::Day1.hole_count(), 18);
        assert_eq!(Course::Day2.hole_count(), 9);
        assert_eq!(Course::Day1.total_par(), 72);
        assert_eq!(Course::Day2.total_par(), 36);
    }

    #[test]
    fn test_holes_are_numbered_in_order() {
        for course in [Course::Day1, Course::Day2] {
            for (idx, info) in course.holes().iter().enumerate() {
                assert_eq!(info.number, idx as i16 + 1);
            }
        }
    }

    #[test]
    fn test_hole_lookup() {
        assert_eq!(Course::Day2.hole(2).map(|h| h.par), Some(3));
        assert!(Course::Day2.hole(10).is_none());
        assert!(Course::Day1.contains_hole(18));
        assert!(!Course::Day1.contains_hole(0));
    }

    #[test]
    fn test_to_par_display() {
        assert_eq!(ToPar::new(4, 4).to_string(), "E");
        assert_eq!(ToPar::new(6, 4).to_string(), "+2");
        assert_eq!(ToPar::new(2, 3).to_string(), "-1");
        assert_eq!(ToPar::new(70, Course::Day1.total_par()).to_string(), "-2");
    }
}
