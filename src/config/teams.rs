/// League roster used to give every team a row, even before its first game.
///
/// Names must match the schedule feed after normalization (seed markers and
/// asterisks stripped).
#[derive(Debug, Clone)]
pub struct TeamConfig {
    pub abbreviation: &'static str,
    pub name: &'static str,
}

impl TeamConfig {
    pub fn new(abbreviation: &'static str, name: &'static str) -> Self {
        Self { abbreviation, name }
    }
}

pub fn get_teams() -> Vec<TeamConfig> {
    vec![
        TeamConfig::new("ATL", "Atlanta Hawks"),
        TeamConfig::new("BOS", "Boston Celtics"),
        TeamConfig::new("BKN", "Brooklyn Nets"),
        TeamConfig::new("CHA", "Charlotte Hornets"),
        TeamConfig::new("CHI", "Chicago Bulls"),
        TeamConfig::new("CLE", "Cleveland Cavaliers"),
        TeamConfig::new("DAL", "Dallas Mavericks"),
        TeamConfig::new("DEN", "Denver Nuggets"),
        TeamConfig::new("DET", "Detroit Pistons"),
        TeamConfig::new("GSW", "Golden State Warriors"),
        TeamConfig::new("HOU", "Houston Rockets"),
        TeamConfig::new("IND", "Indiana Pacers"),
        TeamConfig::new("LAC", "Los Angeles Clippers"),
        TeamConfig::new("LAL", "Los Angeles Lakers"),
        TeamConfig::new("MEM", "Memphis Grizzlies"),
        TeamConfig::new("MIA", "Miami Heat"),
        TeamConfig::new("MIL", "Milwaukee Bucks"),
        TeamConfig::new("MIN", "Minnesota Timberwolves"),
        TeamConfig::new("NOP", "New Orleans Pelicans"),
        TeamConfig::new("NYK", "New York Knicks"),
        TeamConfig::new("OKC", "Oklahoma City Thunder"),
        TeamConfig::new("ORL", "Orlando Magic"),
        TeamConfig::new("PHI", "Philadelphia 76ers"),
        TeamConfig::new("PHX", "Phoenix Suns"),
        TeamConfig::new("POR", "Portland Trail Blazers"),
        TeamConfig::new("SAC", "Sacramento Kings"),
        TeamConfig::new("SAS", "San Antonio Spurs"),
        TeamConfig::new("TOR", "Toronto Raptors"),
        TeamConfig::new("UTA", "Utah Jazz"),
        TeamConfig::new("WAS", "Washington Wizards"),
    ]
}

pub fn roster_names() -> Vec<String> {
    get_teams().iter().map(|t| t.name.to_string()).collect()
}

pub fn find_team(name: &str) -> Option<TeamConfig> {
    get_teams()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name) || t.abbreviation.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_has_thirty_unique_teams() {
        let mut names = roster_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 30);
    }

    #[test]
    fn test_find_by_abbreviation_or_name() {
        assert_eq!(find_team("okc").map(|t| t.name), Some("Oklahoma City Thunder"));
        assert_eq!(find_team("miami heat").map(|t| t.abbreviation), Some("MIA"));
        assert!(find_team("Seattle SuperSonics").is_none());
    }
}
