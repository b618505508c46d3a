pub mod course;
pub mod leaderboard;
pub mod score;
