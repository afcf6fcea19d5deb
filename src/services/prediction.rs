use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{find_team, AppConfig};
use crate::database::{self, snapshots, DbConn};
use crate::domain::normalize_team_name;
use crate::engine::snapshot::second_degree_scores;
use crate::engine::{predict_matchup, Prediction, Score};

/// Head-to-head call made from a stored snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupPrediction {
    pub home: String,
    pub visitor: String,
    pub as_of_date: NaiveDate,
    pub home_second_degree: Score,
    pub visitor_second_degree: Score,
    pub prediction: Option<Prediction>,
}

pub struct PredictionService {
    config: AppConfig,
}

impl PredictionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, home: &str, visitor: &str) -> Result<MatchupPrediction> {
        let pool = database::create_pool(&self.config.storage.database_path)?;
        let mut conn = database::get_connection(&pool)?;
        predict_from_latest(&mut conn, home, visitor)
    }
}

/// Roster name for a full name or abbreviation; unknown names are only normalized
pub fn resolve_team(name: &str) -> String {
    let normalized = normalize_team_name(name);
    find_team(&normalized)
        .map(|team| team.name.to_string())
        .unwrap_or(normalized)
}

pub fn predict_from_latest(
    conn: &mut DbConn,
    home: &str,
    visitor: &str,
) -> Result<MatchupPrediction> {
    let latest = snapshots::load_latest(conn)?
        .context("No snapshot stored yet; run setup first")?;

    let home = resolve_team(home);
    let visitor = resolve_team(visitor);
    let scores = second_degree_scores(&latest.rows);

    Ok(MatchupPrediction {
        home_second_degree: scores.get(&home).copied().unwrap_or(0),
        visitor_second_degree: scores.get(&visitor).copied().unwrap_or(0),
        prediction: predict_matchup(&scores, &home, &visitor),
        as_of_date: latest.snapshot.as_of_date,
        home,
        visitor,
    })
}
