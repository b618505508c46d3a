pub mod courses;
pub mod day1;
pub mod day2;
pub mod leaderboard;
pub mod session;
