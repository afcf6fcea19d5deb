use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::{SecondDegreeMode, TeamSnapshot};

/// Header of a stored snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: i64,
    pub as_of_date: NaiveDate,
    pub second_degree_mode: SecondDegreeMode,
    pub games_counted: i64,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct SnapshotWithRows {
    pub snapshot: Snapshot,
    pub rows: Vec<TeamSnapshot>,
}

/// What an upsert did to the stored schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChange {
    Inserted,
    /// Previously unplayed game now has a final score
    Completed,
    /// Final score replaced by a different one
    Corrected,
    Unchanged,
}

impl GameChange {
    /// Whether the game is a completed game the store did not count before
    pub fn is_new_result(&self, completed: bool) -> bool {
        match self {
            GameChange::Inserted => completed,
            GameChange::Completed => true,
            GameChange::Corrected | GameChange::Unchanged => false,
        }
    }
}
