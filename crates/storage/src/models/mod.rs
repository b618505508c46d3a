mod course;
mod score;
mod skin;
mod team;

pub use course::{Course, HoleInfo, ToPar};
pub use score::{Day1Key, Day1Score, Day2Key, Day2Score, GROUPS, STROKES_RANGE, SkinKey};
pub use skin::{NewSkinWin, SkinOutcome, SkinResult, SkinWin};
pub use team::{Team, UnknownTeam};
