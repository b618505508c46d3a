pub mod day1_score;
pub mod day2_score;
pub mod skin;
