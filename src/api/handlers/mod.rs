use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::database::DbPool;

pub mod admin;
pub mod standings;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct StandingsParams {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PredictParams {
    pub home: String,
    pub visitor: String,
}

#[derive(Deserialize)]
pub struct UpdateParams {
    #[serde(default)]
    pub force: bool,
}
