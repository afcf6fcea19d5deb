use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};

use crate::api::ScheduleClient;
use crate::cache::remove_cache_dir;
use crate::config::{roster_names, AppConfig};
use crate::database::{self, setup, snapshots, DbConn, Snapshot};
use crate::domain::{GameOutcome, SeasonWindow};
use crate::files::read_schedule;

use super::recorder::{record_snapshot, record_zero_snapshot, store_games};

#[derive(Debug, Clone)]
pub struct SetupSummary {
    pub games: usize,
    pub new_results: usize,
    pub snapshot: Snapshot,
}

/// Creates the store and loads the season so far.
pub struct SetupService {
    config: AppConfig,
    schedule_file: Option<PathBuf>,
}

impl SetupService {
    /// `schedule_file` replaces the feed with a schedule CSV
    pub fn new(config: AppConfig, schedule_file: Option<PathBuf>) -> Self {
        Self {
            config,
            schedule_file,
        }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<SetupSummary> {
        info!("=== Starting Setup ===\n");

        let window = self.config.season.window()?;
        let schedule = self.load_schedule(&window, today).await?;
        info!("  → Loaded {} scheduled games\n", schedule.len());

        let pool = database::create_pool(&self.config.storage.database_path)?;
        let mut conn = database::get_connection(&pool)?;
        let summary = self.populate(&mut conn, &window, &schedule, today)?;

        info!("=== Setup Complete ===");
        Ok(summary)
    }

    async fn load_schedule(
        &self,
        window: &SeasonWindow,
        today: NaiveDate,
    ) -> Result<Vec<GameOutcome>> {
        match &self.schedule_file {
            Some(path) => {
                info!("Step 1: Reading schedule from {}", path.display());
                let games = read_schedule(path)?;
                Ok(games.into_iter().filter(|g| window.contains(g.date)).collect())
            }
            None => {
                info!("Step 1: Fetching season schedule...");
                let mut client = ScheduleClient::new(&self.config)?;
                Ok(client.fetch_season(window, today).await)
            }
        }
    }

    fn populate(
        &self,
        conn: &mut DbConn,
        window: &SeasonWindow,
        schedule: &[GameOutcome],
        today: NaiveDate,
    ) -> Result<SetupSummary> {
        setup::initialize_database(conn)?;

        let propagation = &self.config.propagation;
        let options = propagation.options(propagation.snapshot_mode);
        let roster = roster_names();

        if snapshots::latest_snapshot(conn)?.is_none() {
            record_zero_snapshot(conn, &roster, window.start, &options)?;
            info!("  → Initial snapshot written for {}\n", window.start);
        }

        let new_results = store_games(conn, schedule)?;
        let snapshot = record_snapshot(conn, &roster, today, &options, &new_results)?;

        Ok(SetupSummary {
            games: schedule.len(),
            new_results: new_results.len(),
            snapshot,
        })
    }
}

/// Setup is complete once the database exists and holds a snapshot
pub fn is_setup_complete(config: &AppConfig) -> Result<bool> {
    if !Path::new(&config.storage.database_path).exists() {
        return Ok(false);
    }

    let pool = database::create_pool(&config.storage.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    setup::initialize_database(&mut conn)?;

    Ok(snapshots::latest_snapshot(&mut conn)?.is_some())
}

/// Delete the database file and the feed cache
pub fn teardown(config: &AppConfig) -> Result<()> {
    info!("=== Teardown ===");
    setup::remove_database(&config.storage.database_path)?;
    remove_cache_dir(Path::new(&config.storage.cache_dir))?;
    info!("All stored data removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::temp_connection;

    fn temp_config(name: &str) -> AppConfig {
        let base =
            std::env::temp_dir().join(format!("league_setup_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        std::fs::create_dir_all(&base).unwrap();

        let mut config = AppConfig::new();
        config.storage.database_path = base.join("league.db").to_string_lossy().to_string();
        config.storage.cache_dir = base.join("cache").to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_populate_writes_zero_and_current_snapshots() {
        let config = AppConfig::new();
        let window = config.season.window().unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 10, d).unwrap();
        let today = day(25);
        let schedule = vec![
            GameOutcome::played(day(22), "Boston Celtics", 132, "New York Knicks", 109),
            GameOutcome::scheduled(day(28), "Boston Celtics", "Milwaukee Bucks"),
        ];

        let mut conn = temp_connection("setup_populate");
        let service = SetupService::new(config, None);
        let summary = service.populate(&mut conn, &window, &schedule, today).unwrap();

        assert_eq!(summary.games, 2);
        assert_eq!(summary.new_results, 1);
        assert_eq!(summary.snapshot.as_of_date, today);

        let all = snapshots::list_snapshots(&mut conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].as_of_date, window.start);
        assert_eq!(all[0].games_counted, 0);

        let rows = snapshots::load_rows(&mut conn, summary.snapshot.id).unwrap();
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].team, "Boston Celtics");
        assert_eq!(rows[0].wins, 1);
    }

    #[test]
    fn test_setup_incomplete_without_database() {
        let config = temp_config("incomplete");
        assert!(!is_setup_complete(&config).unwrap());
    }

    #[test]
    fn test_teardown_removes_files() {
        let config = temp_config("teardown");
        std::fs::write(&config.storage.database_path, b"").unwrap();
        std::fs::create_dir_all(&config.storage.cache_dir).unwrap();

        teardown(&config).unwrap();

        assert!(!Path::new(&config.storage.database_path).exists());
        assert!(!Path::new(&config.storage.cache_dir).exists());
    }
}
