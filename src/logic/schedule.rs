//! Group stage fixtures: round-robin generation and manual scheduling.

use crate::models::{
    GameMatch, MatchId, Phase, TeamId, Tournament, TournamentError,
};
use chrono::{DateTime, Utc};

/// Round-robin schedule by the circle method; every team meets every other once.
///
/// 1. With an odd count, add a bye slot so the rotation is even.
/// 2. Keep the first slot fixed; for each of `size - 1` rounds pair slot `i` (home)
///    with slot `size - 1 - i`, dropping pairings with the bye.
/// 3. Rotate the remaining slots one step (last moves to the front).
///
/// The same input order always yields the same schedule. Fewer than 2 teams yields none.
pub fn generate_group_schedule(teams: &[TeamId]) -> Vec<GameMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut rotation: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if rotation.len() % 2 != 0 {
        rotation.push(None);
    }
    let size = rotation.len();

    let mut schedule = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for round in 0..size - 1 {
        for i in 0..size / 2 {
            if let (Some(home), Some(away)) = (rotation[i], rotation[size - 1 - i]) {
                schedule.push(GameMatch::new(home, away, Phase::Group).with_round(round as u32 + 1));
            }
        }
        rotation[1..].rotate_right(1);
    }
    schedule
}

/// Generate and store the group schedule for every registered team.
pub fn schedule_group_phase(tournament: &mut Tournament) -> Result<Vec<GameMatch>, TournamentError> {
    if tournament.teams.len() < 2 {
        return Err(TournamentError::InsufficientTeams {
            required: 2,
            available: tournament.teams.len(),
        });
    }
    if tournament.has_matches_in(Phase::Group) {
        return Err(TournamentError::DuplicatePhase(Phase::Group));
    }
    let ids: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    let schedule = generate_group_schedule(&ids);
    log::info!(
        "Generated group schedule: {} match(es) for {} team(s)",
        schedule.len(),
        ids.len()
    );
    tournament.matches.extend(schedule.iter().cloned());
    Ok(schedule)
}

/// Add a single group fixture by hand. Not allowed once knockouts exist.
pub fn schedule_match(
    tournament: &mut Tournament,
    home_team_id: TeamId,
    away_team_id: TeamId,
    date: Option<DateTime<Utc>>,
) -> Result<GameMatch, TournamentError> {
    if home_team_id == away_team_id {
        return Err(TournamentError::invalid("a team cannot play itself"));
    }
    tournament.team(home_team_id)?;
    tournament.team(away_team_id)?;
    if let Some(phase) = Phase::ALL
        .into_iter()
        .filter(|p| p.is_knockout())
        .find(|p| tournament.has_matches_in(*p))
    {
        return Err(TournamentError::DuplicatePhase(phase));
    }
    let game = GameMatch::new(home_team_id, away_team_id, Phase::Group).with_date(date);
    tournament.matches.push(game.clone());
    Ok(game)
}

/// Set or clear a match date.
pub fn reschedule_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    date: Option<DateTime<Utc>>,
) -> Result<GameMatch, TournamentError> {
    let game = tournament.game_mut(match_id)?;
    game.date = date;
    Ok(game.clone())
}

/// Remove a fixture that has no result and is not part of the knockout bracket.
pub fn delete_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let game = tournament.game(match_id)?;
    if game.is_played() {
        return Err(TournamentError::invalid("a played match cannot be deleted"));
    }
    if game.phase.is_knockout() {
        return Err(TournamentError::invalid("knockout fixtures belong to the bracket"));
    }
    tournament.matches.retain(|m| m.id != match_id);
    Ok(())
}
