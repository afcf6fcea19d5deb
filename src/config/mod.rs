pub mod settings;
pub mod teams;

pub use settings::AppConfig;
pub use teams::{find_team, get_teams, roster_names, TeamConfig};
