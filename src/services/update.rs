use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use crate::api::ScheduleClient;
use crate::config::{roster_names, AppConfig};
use crate::database::{self, setup, snapshots, DbConn, Snapshot};
use crate::domain::GameOutcome;
use crate::engine::PropagationOptions;

use super::recorder::{record_snapshot, store_games};
use super::setup::{is_setup_complete, SetupService};

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// A snapshot for the day already exists and the update was not forced
    AlreadyCurrent(Snapshot),
    /// Store was empty, so a full setup ran instead
    SetUp(Snapshot),
    Updated { snapshot: Snapshot, new_results: usize },
}

impl UpdateOutcome {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            UpdateOutcome::AlreadyCurrent(snapshot) | UpdateOutcome::SetUp(snapshot) => snapshot,
            UpdateOutcome::Updated { snapshot, .. } => snapshot,
        }
    }
}

/// Daily refresh: pulls the running and previous months and writes a new
/// snapshot.
pub struct UpdateService {
    config: AppConfig,
    force: bool,
}

impl UpdateService {
    pub fn new(config: AppConfig, force: bool) -> Self {
        Self { config, force }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<UpdateOutcome> {
        if !is_setup_complete(&self.config)? {
            info!("Setup is incomplete; running setup first");
            let summary = SetupService::new(self.config.clone(), None).run(today).await?;
            return Ok(UpdateOutcome::SetUp(summary.snapshot));
        }

        let pool = database::create_pool(&self.config.storage.database_path)?;
        let mut conn = database::get_connection(&pool)?;

        if let Some(existing) = self.current_snapshot(&mut conn, today)? {
            info!("Snapshot for {} already exists (use --force to recompute)", today);
            return Ok(UpdateOutcome::AlreadyCurrent(existing));
        }

        info!("=== Starting Update for {} ===\n", today);

        let window = self.config.season.window()?;
        let mut client = ScheduleClient::new(&self.config)?;
        let games = client.fetch_recent(&window, today).await;
        info!("  → Fetched {} games for the recent months\n", games.len());

        let propagation = &self.config.propagation;
        let options = propagation.options(propagation.snapshot_mode);
        let outcome = apply_update(&mut conn, &games, today, &options)?;

        info!("=== Update Complete ===");
        Ok(outcome)
    }

    fn current_snapshot(&self, conn: &mut DbConn, today: NaiveDate) -> Result<Option<Snapshot>> {
        if self.force {
            return Ok(None);
        }
        snapshots::find_by_date(conn, today)
    }
}

/// Store fetched games and snapshot the result as of `today`
pub fn apply_update(
    conn: &mut DbConn,
    games: &[GameOutcome],
    today: NaiveDate,
    options: &PropagationOptions,
) -> Result<UpdateOutcome> {
    setup::initialize_database(conn)?;

    let new_results = store_games(conn, games)?;
    let snapshot = record_snapshot(conn, &roster_names(), today, options, &new_results)?;

    Ok(UpdateOutcome::Updated {
        snapshot,
        new_results: new_results.len(),
    })
}
