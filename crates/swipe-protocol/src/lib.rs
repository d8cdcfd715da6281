pub mod config;
pub mod leaderboard;
