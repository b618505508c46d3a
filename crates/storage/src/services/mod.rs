pub mod day1_points;
pub mod leaderboard;
pub mod skins;
