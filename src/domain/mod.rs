pub mod models;
mod progress;
pub mod season;

pub use models::{normalize_team_name, parse_game_date, GameOutcome, ScheduleEntry};
pub use progress::FetchProgress;
pub use season::{SeasonMonth, SeasonWindow};
