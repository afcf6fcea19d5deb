use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

pub type Team = String;
pub type Score = u64;
pub type StandingsMap = BTreeMap<Team, StandingsRecord>;
pub type OpponentCounts = BTreeMap<Team, u32>;
pub type AdjacencyMap = BTreeMap<Team, OpponentCounts>;
pub type DegreeScores = BTreeMap<Team, Score>;

/// Directed winner -> defeated opponent game counts
pub type VictoryMap = AdjacencyMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRecord {
    pub wins: u32,
    pub losses: u32,
}

impl StandingsRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Which games feed the second-degree sum.
///
/// `AllGames` credits a team with the wins of every opponent it played,
/// weighted by how many times they met. `WinsOnly` credits only the wins of
/// opponents the team actually beat, once per victory. Daily snapshots
/// default to the former and backtests to the latter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecondDegreeMode {
    #[default]
    AllGames,
    WinsOnly,
}

impl SecondDegreeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecondDegreeMode::AllGames => "all-games",
            SecondDegreeMode::WinsOnly => "wins-only",
        }
    }
}

impl fmt::Display for SecondDegreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecondDegreeMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "all-games" => Ok(SecondDegreeMode::AllGames),
            "wins-only" => Ok(SecondDegreeMode::WinsOnly),
            other => Err(EngineError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThirdDegreeOptions {
    /// Drop contributions where the two-hop walk lands back on the team itself
    pub exclude_self: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationOptions {
    pub second_degree_mode: SecondDegreeMode,
    pub third_degree: ThirdDegreeOptions,
}

impl PropagationOptions {
    pub fn with_mode(mut self, mode: SecondDegreeMode) -> Self {
        self.second_degree_mode = mode;
        self
    }
}
