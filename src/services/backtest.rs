use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::api::ScheduleClient;
use crate::config::{roster_names, AppConfig};
use crate::database::{self, games, setup};
use crate::domain::GameOutcome;
use crate::engine::{
    compute_snapshot, decide, partition_results, predict_matchup, PropagationOptions,
    SecondDegreeMode, Team,
};
use crate::files::{read_schedule, write_results, BacktestRow};

/// Totals across every replayed day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BacktestSummary {
    pub days: usize,
    pub games: usize,
    pub predicted: usize,
    pub correct: usize,
}

impl BacktestSummary {
    pub fn add_day(&mut self, rows: &[BacktestRow]) {
        self.days += 1;
        self.games += rows.len();
        self.predicted += rows.iter().filter(|r| r.predicted.is_some()).count();
        self.correct += rows.iter().filter(|r| r.correct).count();
    }

    /// Correct picks over games where a pick was made
    pub fn accuracy(&self) -> Option<f64> {
        (self.predicted > 0).then(|| self.correct as f64 / self.predicted as f64)
    }
}

/// Predict the games played on the day after `day` using only results up
/// to and including `day`. Completed games without a winner are left out of
/// the training set.
pub fn backtest_day(
    schedule: &[GameOutcome],
    day: NaiveDate,
    roster: &[Team],
    options: &PropagationOptions,
) -> Result<Vec<BacktestRow>> {
    let next_day = day
        .checked_add_days(Days::new(1))
        .context("Backtest day is out of range")?;

    let played: Vec<GameOutcome> = schedule.iter().filter(|g| g.date <= day).cloned().collect();
    let (train, _) = partition_results(&played);
    let computed = compute_snapshot(roster, &train, options)?;
    let scores = &computed.second_degree;

    let mut rows = Vec::new();
    for game in schedule.iter().filter(|g| g.date > day && g.date <= next_day) {
        if !game.is_completed() {
            continue;
        }

        let decision = match decide(game) {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Skipping test game: {}", e);
                continue;
            }
        };

        let prediction = predict_matchup(scores, &game.home_team, &game.visitor_team);
        let correct = prediction
            .as_ref()
            .is_some_and(|p| p.team == decision.winner);

        rows.push(BacktestRow {
            date: game.date,
            home_team: game.home_team.clone(),
            visitor_team: game.visitor_team.clone(),
            confidence: prediction.as_ref().map(|p| p.confidence),
            predicted: prediction.map(|p| p.team),
            winner: decision.winner.to_string(),
            correct,
        });
    }

    Ok(rows)
}

/// Replays a range of days, writing one result CSV per day.
pub struct BacktestService {
    config: AppConfig,
    mode: SecondDegreeMode,
    schedule_file: Option<PathBuf>,
}

impl BacktestService {
    pub fn new(config: AppConfig, mode: SecondDegreeMode, schedule_file: Option<PathBuf>) -> Self {
        Self {
            config,
            mode,
            schedule_file,
        }
    }

    pub async fn run(&self, from: NaiveDate, to: NaiveDate) -> Result<BacktestSummary> {
        if to < from {
            anyhow::bail!("Backtest range ends ({}) before it starts ({})", to, from);
        }

        info!("=== Starting Backtest {} to {} ({}) ===\n", from, to, self.mode);

        let schedule = self.load_schedule(to).await?;
        info!("  → Replaying against {} games\n", schedule.len());

        let summary = self.replay(&schedule, from, to)?;

        match summary.accuracy() {
            Some(accuracy) => info!(
                "Backtest accuracy: {}/{} picks correct ({:.1}%), {} games over {} days",
                summary.correct,
                summary.predicted,
                accuracy * 100.0,
                summary.games,
                summary.days
            ),
            None => info!("Backtest made no picks over {} days", summary.days),
        }

        info!("=== Backtest Complete ===");
        Ok(summary)
    }

    fn replay(
        &self,
        schedule: &[GameOutcome],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BacktestSummary> {
        let (_, rejected) = partition_results(schedule);
        for e in rejected {
            warn!("Ignoring {}", e);
        }

        let options = self.config.propagation.options(self.mode);
        let roster = roster_names();
        let output_dir = Path::new(&self.config.storage.backtest_dir);
        let mut summary = BacktestSummary::default();

        for day in from.iter_days().take_while(|d| *d <= to) {
            let rows = backtest_day(schedule, day, &roster, &options)?;
            let path = write_results(output_dir, day, &rows)?;
            info!("  {}: {} games → {}", day, rows.len(), path.display());
            summary.add_day(&rows);
        }

        Ok(summary)
    }

    /// Schedule file if given, else the stored games, else the cached or fetched season
    async fn load_schedule(&self, to: NaiveDate) -> Result<Vec<GameOutcome>> {
        if let Some(path) = &self.schedule_file {
            return read_schedule(path);
        }

        if Path::new(&self.config.storage.database_path).exists() {
            let pool = database::create_pool(&self.config.storage.database_path)?;
            let mut conn = database::get_connection(&pool)?;
            setup::initialize_database(&mut conn)?;
            let stored = games::list_all(&mut conn)?;
            if !stored.is_empty() {
                return Ok(stored);
            }
        }

        let window = self.config.season.window()?;
        let mut client = ScheduleClient::new(&self.config)?;
        if let Some(cached) = client.cached_season()? {
            if cached.iter().any(|g| g.date > to) {
                return Ok(cached);
            }
        }

        let through = to.checked_add_days(Days::new(1)).unwrap_or(to);
        Ok(client.fetch_season(&window, through).await)
    }
}
