use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Absent means scores are kept in memory only
    pub database_url: Option<String>,
    pub access_code: String,
    pub leaderboard_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            access_code: std::env::var("ACCESS_CODE")
                .context("Cannot load ACCESS_CODE env variable")?,
            leaderboard_refresh_secs: std::env::var("LEADERBOARD_REFRESH_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("LEADERBOARD_REFRESH_SECS must be a number")?,
        })
    }
}
