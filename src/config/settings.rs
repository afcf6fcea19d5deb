use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::SeasonWindow;
use crate::engine::{PropagationOptions, SecondDegreeMode, ThirdDegreeOptions};

#[derive(Debug, Clone)]
pub struct SeasonSettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for SeasonSettings {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 10, 1).expect("valid season start"),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 30).expect("valid season end"),
        }
    }
}

impl SeasonSettings {
    pub fn window(&self) -> Result<SeasonWindow> {
        SeasonWindow::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone)]
pub struct PropagationSettings {
    /// Rule for snapshots written by setup/update
    pub snapshot_mode: SecondDegreeMode,
    /// Rule used when replaying the season in a backtest
    pub backtest_mode: SecondDegreeMode,
    pub exclude_self_in_third_degree: bool,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self {
            snapshot_mode: SecondDegreeMode::AllGames,
            backtest_mode: SecondDegreeMode::WinsOnly,
            exclude_self_in_third_degree: false,
        }
    }
}

impl PropagationSettings {
    pub fn options(&self, mode: SecondDegreeMode) -> PropagationOptions {
        PropagationOptions {
            second_degree_mode: mode,
            third_degree: ThirdDegreeOptions {
                exclude_self: self.exclude_self_in_third_degree,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// `{year}` and `{month}` (lowercase month name) are substituted per request
    pub schedule_url_template: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 1000,
            user_agent: "LeagueStandings/1.0".to_string(),
            timeout_secs: 30,
            schedule_url_template: "http://127.0.0.1:8000/schedule/{year}/{month}.json".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub cache_dir: String,
    pub backtest_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "league_standings.db".to_string(),
            cache_dir: "cache".to_string(),
            backtest_dir: "backtest_results".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub admin_token: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            admin_token: "secret".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub season: SeasonSettings,
    pub propagation: PropagationSettings,
    pub source: SourceSettings,
    pub storage: StorageSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by environment variables where set
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Some(path) = read_env("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Some(dir) = read_env("CACHE_DIR") {
            config.storage.cache_dir = dir;
        }
        if let Some(dir) = read_env("BACKTEST_DIR") {
            config.storage.backtest_dir = dir;
        }
        if let Some(url) = read_env("SCHEDULE_URL") {
            config.source.schedule_url_template = url;
        }
        if let Some(token) = read_env("ADMIN_TOKEN") {
            config.server.admin_token = token;
        }
        if let Some(start) = read_env("SEASON_START") {
            config.season.start_date = parse_env_date("SEASON_START", &start)?;
        }
        if let Some(end) = read_env("SEASON_END") {
            config.season.end_date = parse_env_date("SEASON_END", &end)?;
        }
        if let Some(mode) = read_env("SNAPSHOT_MODE") {
            config.propagation.snapshot_mode = mode
                .parse()
                .context("Invalid SNAPSHOT_MODE")?;
        }
        if let Some(mode) = read_env("BACKTEST_MODE") {
            config.propagation.backtest_mode = mode
                .parse()
                .context("Invalid BACKTEST_MODE")?;
        }
        if let Some(flag) = read_env("THIRD_DEGREE_EXCLUDE_SELF") {
            config.propagation.exclude_self_in_third_degree =
                parse_env_flag("THIRD_DEGREE_EXCLUDE_SELF", &flag)?;
        }

        config.season.window()?;
        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be true or false, got {}", key, other),
    }
}

fn parse_env_date(key: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("{} must be a YYYY-MM-DD date, got {}", key, value))
}
