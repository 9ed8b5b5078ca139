//! Knockout rounds: seeded pairings, fixtures and tie resolution.

use crate::models::{
    GameMatch, Leg, MatchId, Phase, Reference, TeamId, Tie, Tournament, TournamentError,
};
use serde::Serialize;

/// Who goes through from a tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", content = "team_id", rename_all = "snake_case")]
pub enum TieOutcome {
    Winner(TeamId),
    /// Unplayed, or level with no shoot-out recorded.
    Undetermined,
}

/// A seeded matchup before fixtures exist. `slot` is the stable position in the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub slot: usize,
    pub high_seed: TeamId,
    pub low_seed: TeamId,
}

/// Fold a ranked list: 1st vs last, 2nd vs second-to-last, and so on.
///
/// Applied to standings this gives 1v8, 2v7, 3v6, 4v5 (or 1v4, 2v3).
pub fn seed_pairings(ranked: &[TeamId]) -> Vec<Pairing> {
    let n = ranked.len();
    (0..n / 2)
        .map(|slot| Pairing {
            slot,
            high_seed: ranked[slot],
            low_seed: ranked[n - 1 - slot],
        })
        .collect()
}

/// Pair the previous round's winners by adjacent slots: 0v1, 2v3, and so on.
///
/// Winners come in slot order, so the winner of the earlier slot is listed first and hosts.
pub fn bracket_pairings(winners: &[TeamId]) -> Vec<Pairing> {
    winners
        .chunks_exact(2)
        .enumerate()
        .map(|(slot, pair)| Pairing {
            slot,
            high_seed: pair[0],
            low_seed: pair[1],
        })
        .collect()
}

/// Turn pairings into bracket ties and scheduled matches.
///
/// Two-legged ties: the lower seed hosts leg 1, the higher seed hosts leg 2.
/// Single matches are hosted by the higher seed.
pub fn build_fixtures(
    phase: Phase,
    pairings: &[Pairing],
    two_legged: bool,
) -> (Vec<Tie>, Vec<GameMatch>) {
    let mut ties = Vec::with_capacity(pairings.len());
    let mut games = Vec::new();
    for p in pairings {
        let legs = if two_legged {
            vec![
                GameMatch::new(p.low_seed, p.high_seed, phase).with_leg(Leg::First),
                GameMatch::new(p.high_seed, p.low_seed, phase).with_leg(Leg::Second),
            ]
        } else {
            vec![GameMatch::new(p.high_seed, p.low_seed, phase)]
        };
        ties.push(Tie {
            phase,
            slot: p.slot,
            high_seed: p.high_seed,
            low_seed: p.low_seed,
            legs: legs.iter().map(|m| m.id).collect(),
        });
        games.extend(legs);
    }
    (ties, games)
}

/// Aggregate over the legs of one tie (one or two matches between the same teams).
///
/// Every leg must be played. Goals are summed per team across the home/away swap; the
/// higher total wins. A level aggregate is decided by a shoot-out recorded on the last
/// leg, otherwise the tie stays undetermined. Away goals carry no extra weight.
pub fn aggregate_winner(legs: &[&GameMatch]) -> TieOutcome {
    let Some(first) = legs.first() else {
        return TieOutcome::Undetermined;
    };
    let (team_a, team_b) = (first.home_team_id, first.away_team_id);
    let mut goals_a = 0u64;
    let mut goals_b = 0u64;
    for leg in legs {
        if !(leg.involves(team_a) && leg.involves(team_b)) {
            log::warn!("Match {} does not belong to tie {} vs {}", leg.id, team_a, team_b);
            return TieOutcome::Undetermined;
        }
        match (leg.goals_for_against(team_a), leg.is_played()) {
            (Some((gf, ga)), true) => {
                goals_a += u64::from(gf);
                goals_b += u64::from(ga);
            }
            _ => return TieOutcome::Undetermined,
        }
    }
    if goals_a != goals_b {
        return TieOutcome::Winner(if goals_a > goals_b { team_a } else { team_b });
    }

    let decider = legs[legs.len() - 1];
    match (decider.penalties_for(team_a), decider.penalties_for(team_b)) {
        (Some(pa), Some(pb)) if pa > pb => TieOutcome::Winner(team_a),
        (Some(pa), Some(pb)) if pb > pa => TieOutcome::Winner(team_b),
        _ => TieOutcome::Undetermined,
    }
}

/// Resolve a stored bracket tie.
pub fn tie_winner(tournament: &Tournament, tie: &Tie) -> Result<TieOutcome, TournamentError> {
    let legs = tie
        .legs
        .iter()
        .map(|id| tournament.game(*id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate_winner(&legs))
}

/// Resolve the most advanced tie between two teams.
pub fn aggregate_winner_between(
    tournament: &Tournament,
    team_a: TeamId,
    team_b: TeamId,
) -> Result<TieOutcome, TournamentError> {
    tournament.team(team_a)?;
    tournament.team(team_b)?;
    let tie = tournament
        .bracket
        .iter()
        .filter(|t| t.involves(team_a) && t.involves(team_b))
        .max_by_key(|t| t.phase)
        .ok_or_else(|| {
            TournamentError::invalid(format!("no knockout tie between {} and {}", team_a, team_b))
        })?;
    tie_winner(tournament, tie)
}

/// Winners of every tie in a phase, in slot order. Fails on the first undecided tie.
pub fn phase_winners(tournament: &Tournament, phase: Phase) -> Result<Vec<TeamId>, TournamentError> {
    let mut winners = Vec::new();
    for tie in tournament.ties_in(phase) {
        match tie_winner(tournament, tie)? {
            TieOutcome::Winner(id) => winners.push(id),
            TieOutcome::Undetermined => {
                return Err(TournamentError::UnresolvedTie {
                    team_a: tie.high_seed,
                    team_b: tie.low_seed,
                })
            }
        }
    }
    Ok(winners)
}

/// Winner of the played final, if any.
pub fn champion(tournament: &Tournament) -> Option<TeamId> {
    let tie = tournament.ties_in(Phase::Final).into_iter().next()?;
    match tie_winner(tournament, tie) {
        Ok(TieOutcome::Winner(id)) => Some(id),
        _ => None,
    }
}

/// Legs of the tie `match_id` belongs to.
pub fn tie_legs(tournament: &Tournament, match_id: MatchId) -> Result<Vec<&GameMatch>, TournamentError> {
    let tie = tournament
        .tie_of(match_id)
        .ok_or(TournamentError::NotFound(Reference::Match(match_id)))?;
    tie.legs.iter().map(|id| tournament.game(*id)).collect()
}
