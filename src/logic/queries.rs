//! Read-only views: fixtures by state, match details, scorer and defense tables.

use crate::models::{
    GameMatch, MatchId, MatchPlayerStats, Phase, Player, Team, TeamId, TeamStats, Tournament,
    TournamentError,
};
use serde::Serialize;

/// A match with both teams (squads included) and its stat rows.
#[derive(Clone, Debug, Serialize)]
pub struct MatchDetails {
    pub game: GameMatch,
    pub home_team: Team,
    pub away_team: Team,
    pub player_stats: Vec<MatchPlayerStats>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Scorer {
    pub team_id: TeamId,
    pub team_name: String,
    pub player: Player,
}

#[derive(Clone, Debug, Serialize)]
pub struct Defense {
    pub team_id: TeamId,
    pub team_name: String,
    pub stats: TeamStats,
}

/// Matches of one phase, earliest date first (undated last).
pub fn matches_by_phase(tournament: &Tournament, phase: Phase) -> Vec<GameMatch> {
    by_date_ascending(tournament.matches_in(phase).cloned().collect())
}

/// Every quarter-final, semi-final and final match.
pub fn knockout_matches(tournament: &Tournament) -> Vec<GameMatch> {
    by_date_ascending(
        tournament
            .matches
            .iter()
            .filter(|m| m.phase.is_knockout())
            .cloned()
            .collect(),
    )
}

/// Scheduled (unplayed) matches, earliest date first, undated ones last.
pub fn upcoming_matches(tournament: &Tournament) -> Vec<GameMatch> {
    by_date_ascending(
        tournament
            .matches
            .iter()
            .filter(|m| !m.is_played())
            .cloned()
            .collect(),
    )
}

/// Played matches, most recent first.
pub fn played_matches(tournament: &Tournament) -> Vec<GameMatch> {
    let mut games: Vec<GameMatch> = tournament
        .matches
        .iter()
        .filter(|m| m.is_played())
        .cloned()
        .collect();
    games.sort_by(|a, b| b.date.cmp(&a.date));
    games
}

pub fn match_details(tournament: &Tournament, match_id: MatchId) -> Result<MatchDetails, TournamentError> {
    let game = tournament.game(match_id)?.clone();
    Ok(MatchDetails {
        home_team: tournament.team(game.home_team_id)?.clone(),
        away_team: tournament.team(game.away_team_id)?.clone(),
        player_stats: tournament
            .match_player_stats
            .iter()
            .filter(|s| s.match_id == match_id)
            .cloned()
            .collect(),
        game,
    })
}

/// Players with at least `top_scorer_min_goals`, most goals first.
pub fn top_scorers(tournament: &Tournament) -> Vec<Scorer> {
    let min = tournament.config.top_scorer_min_goals;
    let mut scorers: Vec<Scorer> = tournament
        .teams
        .iter()
        .flat_map(|t| {
            t.players.iter().filter(move |p| p.totals.goals >= min).map(move |p| Scorer {
                team_id: t.id,
                team_name: t.name.clone(),
                player: p.clone(),
            })
        })
        .collect();
    scorers.sort_by(|a, b| b.player.totals.goals.cmp(&a.player.totals.goals));
    scorers
}

/// Teams that have played and conceded at most `best_defense_max_conceded`, fewest first.
pub fn best_defense(tournament: &Tournament) -> Vec<Defense> {
    let max = tournament.config.best_defense_max_conceded;
    let mut teams: Vec<Defense> = tournament
        .teams
        .iter()
        .filter(|t| t.stats.played > 0 && t.stats.goals_against <= max)
        .map(|t| Defense {
            team_id: t.id,
            team_name: t.name.clone(),
            stats: t.stats.clone(),
        })
        .collect();
    teams.sort_by_key(|d| d.stats.goals_against);
    teams
}

fn by_date_ascending(mut games: Vec<GameMatch>) -> Vec<GameMatch> {
    // None sorts first for Option; flip it so undated fixtures come last.
    games.sort_by_key(|m| (m.date.is_none(), m.date));
    games
}
