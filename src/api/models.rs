use chrono::NaiveDate;
use serde::Serialize;

use crate::database::{Snapshot, SnapshotWithRows};
use crate::engine::{SecondDegreeMode, TeamSnapshot};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub snapshot_id: i64,
    pub as_of_date: NaiveDate,
    pub second_degree_mode: SecondDegreeMode,
    pub games_counted: i64,
    pub teams: Vec<TeamSnapshot>,
}

impl From<SnapshotWithRows> for StandingsResponse {
    fn from(standings: SnapshotWithRows) -> Self {
        Self {
            snapshot_id: standings.snapshot.id,
            as_of_date: standings.snapshot.as_of_date,
            second_degree_mode: standings.snapshot.second_degree_mode,
            games_counted: standings.snapshot.games_counted,
            teams: standings.rows,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotListItem {
    pub id: i64,
    pub as_of_date: NaiveDate,
    pub second_degree_mode: SecondDegreeMode,
    pub games_counted: i64,
}

impl From<Snapshot> for SnapshotListItem {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            id: snapshot.id,
            as_of_date: snapshot.as_of_date,
            second_degree_mode: snapshot.second_degree_mode,
            games_counted: snapshot.games_counted,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
