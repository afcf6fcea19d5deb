use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Seed markers and playoff asterisks that standings tables append to names
static NAME_DECORATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*|\(\d+\)").expect("team name pattern is valid"));

/// One game of the league schedule. Scores are `None` until the game is played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub date: NaiveDate,
    pub home_team: String,
    pub visitor_team: String,
    pub home_score: Option<u32>,
    pub visitor_score: Option<u32>,
}

impl GameOutcome {
    pub fn new(
        date: NaiveDate,
        home_team: &str,
        visitor_team: &str,
        home_score: Option<u32>,
        visitor_score: Option<u32>,
    ) -> Self {
        Self {
            date,
            home_team: home_team.to_string(),
            visitor_team: visitor_team.to_string(),
            home_score,
            visitor_score,
        }
    }

    /// A finished game with both final scores known
    pub fn played(
        date: NaiveDate,
        home_team: &str,
        home_score: u32,
        visitor_team: &str,
        visitor_score: u32,
    ) -> Self {
        Self::new(date, home_team, visitor_team, Some(home_score), Some(visitor_score))
    }

    pub fn scheduled(date: NaiveDate, home_team: &str, visitor_team: &str) -> Self {
        Self::new(date, home_team, visitor_team, None, None)
    }

    pub fn is_completed(&self) -> bool {
        self.home_score.is_some() && self.visitor_score.is_some()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.visitor_team == team
    }
}

/// Raw row of a monthly schedule feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: String,
    #[serde(alias = "visitor")]
    pub visitor_team: String,
    #[serde(default, alias = "visitor_score")]
    pub visitor_pts: Option<u32>,
    #[serde(alias = "home")]
    pub home_team: String,
    #[serde(default, alias = "home_score")]
    pub home_pts: Option<u32>,
}

impl ScheduleEntry {
    /// Convert to a game, or `None` when the date column holds no date
    /// (repeated header rows, month separators).
    pub fn to_outcome(&self) -> Option<GameOutcome> {
        let date = parse_game_date(&self.date)?;

        Some(GameOutcome::new(
            date,
            &normalize_team_name(&self.home_team),
            &normalize_team_name(&self.visitor_team),
            self.home_pts,
            self.visitor_pts,
        ))
    }
}

impl From<&GameOutcome> for ScheduleEntry {
    fn from(game: &GameOutcome) -> Self {
        Self {
            date: game.date.format("%Y-%m-%d").to_string(),
            visitor_team: game.visitor_team.clone(),
            visitor_pts: game.visitor_score,
            home_team: game.home_team.clone(),
            home_pts: game.home_score,
        }
    }
}

pub fn normalize_team_name(raw: &str) -> String {
    NAME_DECORATIONS.replace_all(raw, "").trim().to_string()
}

pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    // "Tue, Oct 22, 2024"
    NaiveDate::parse_from_str(raw, "%a, %b %d, %Y").ok()
}
