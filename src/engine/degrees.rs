use super::standings::wins_of;
use super::types::{
    AdjacencyMap, DegreeScores, OpponentCounts, Score, SecondDegreeMode, StandingsMap,
    ThirdDegreeOptions, VictoryMap,
};

/// Second-degree wins: `Σ weights[T][O] × wins(O)` for every team in `weights`.
///
/// Pass the symmetric adjacency map for the all-games rule, or the victory
/// map for the wins-only rule. Opponents without a standings record add 0.
pub fn compute_second_degree(standings: &StandingsMap, weights: &AdjacencyMap) -> DegreeScores {
    weights
        .iter()
        .map(|(team, opponents)| (team.clone(), weighted_opponent_wins(standings, opponents)))
        .collect()
}

fn weighted_opponent_wins(standings: &StandingsMap, opponents: &OpponentCounts) -> Score {
    opponents
        .iter()
        .map(|(opponent, &count)| count as Score * wins_of(standings, opponent) as Score)
        .sum()
}

pub fn second_degree_for_mode(
    mode: SecondDegreeMode,
    standings: &StandingsMap,
    adjacency: &AdjacencyMap,
    victories: &VictoryMap,
) -> DegreeScores {
    match mode {
        SecondDegreeMode::AllGames => compute_second_degree(standings, adjacency),
        SecondDegreeMode::WinsOnly => compute_second_degree(standings, victories),
    }
}

/// Third-degree wins: for each opponent O of T, add the wins of every
/// opponent of O. Edges count once regardless of how many times the pair
/// played, unlike the second degree.
pub fn compute_third_degree(
    standings: &StandingsMap,
    adjacency: &AdjacencyMap,
    options: ThirdDegreeOptions,
) -> DegreeScores {
    adjacency
        .keys()
        .map(|team| (team.clone(), two_hop_wins(team, standings, adjacency, options)))
        .collect()
}

fn two_hop_wins(
    team: &str,
    standings: &StandingsMap,
    adjacency: &AdjacencyMap,
    options: ThirdDegreeOptions,
) -> Score {
    let Some(opponents) = adjacency.get(team) else {
        return 0;
    };

    opponents
        .keys()
        .filter_map(|opponent| adjacency.get(opponent))
        .flat_map(|second_hop| second_hop.keys())
        .filter(|candidate| !(options.exclude_self && candidate.as_str() == team))
        .map(|candidate| wins_of(standings, candidate) as Score)
        .sum()
}
