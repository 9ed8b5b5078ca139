//! Phase progression: GROUP → QUARTER_FINAL → SEMI_FINAL → FINAL.

use crate::logic::knockout::{bracket_pairings, build_fixtures, phase_winners, seed_pairings, Pairing};
use crate::logic::standings::get_standings;
use crate::models::{GameMatch, Phase, TeamId, Tournament, TournamentError};

/// Most advanced phase with any match; GROUP when nothing exists yet.
pub fn current_phase(tournament: &Tournament) -> Phase {
    Phase::ALL
        .into_iter()
        .rev()
        .find(|p| tournament.has_matches_in(*p))
        .unwrap_or(Phase::Group)
}

/// Next round's matchups and format.
struct NextRound {
    phase: Phase,
    pairings: Vec<Pairing>,
    two_legged: bool,
}

/// Generate the next phase's fixtures from current results. All-or-nothing.
///
/// From GROUP the number of ranked teams picks the round: 8 or more go to two-legged
/// quarter-finals (top 8), 4 to 7 to single-match semi-finals (top 4), 2 or 3 straight
/// to the final (top 2), paired 1st v last. From a knockout phase the tie winners move on
/// and meet the winner of the adjacent slot.
/// Never touches team stats.
pub fn advance(tournament: &mut Tournament) -> Result<Vec<GameMatch>, TournamentError> {
    tournament.atomically(|t| {
        let current = current_phase(t);
        if current == Phase::Final {
            return Err(TournamentError::PhaseComplete);
        }

        let pending = t.matches_in(current).filter(|m| !m.is_played()).count();
        if pending > 0 {
            log::warn!("Cannot advance from {}: {} match(es) pending", current, pending);
            return Err(TournamentError::MatchesPending {
                phase: current,
                pending,
            });
        }

        let next = next_round(t, current)?;
        // A phase counts as generated once it has matches or bracket ties.
        if t.has_matches_in(next.phase) || !t.ties_in(next.phase).is_empty() {
            return Err(TournamentError::DuplicatePhase(next.phase));
        }

        let (ties, games) = build_fixtures(next.phase, &next.pairings, next.two_legged);
        t.bracket.extend(ties);
        t.matches.extend(games.iter().cloned());
        log::info!(
            "Advanced {} -> {}: {} team(s), {} match(es)",
            current,
            next.phase,
            next.pairings.len() * 2,
            games.len()
        );
        Ok(games)
    })
}

fn next_round(t: &Tournament, current: Phase) -> Result<NextRound, TournamentError> {
    match current {
        Phase::Group => {
            let ranked: Vec<TeamId> = get_standings(t).into_iter().map(|s| s.team_id).collect();
            let (phase, take, two_legged) = match ranked.len() {
                n if n >= 8 => (Phase::QuarterFinal, 8, true),
                4..=7 => (Phase::SemiFinal, 4, false),
                2..=3 => (Phase::Final, 2, false),
                n => {
                    return Err(TournamentError::InsufficientTeams {
                        required: 2,
                        available: n,
                    })
                }
            };
            Ok(NextRound {
                phase,
                pairings: seed_pairings(&ranked[..take]),
                two_legged,
            })
        }
        Phase::QuarterFinal | Phase::SemiFinal => {
            let expected = if current == Phase::QuarterFinal { 4 } else { 2 };
            let winners = phase_winners(t, current)?;
            if winners.len() != expected {
                return Err(TournamentError::InsufficientTeams {
                    required: expected,
                    available: winners.len(),
                });
            }
            let phase = current.next_knockout().ok_or(TournamentError::PhaseComplete)?;
            Ok(NextRound {
                phase,
                pairings: bracket_pairings(&winners),
                two_legged: false,
            })
        }
        Phase::Final => Err(TournamentError::PhaseComplete),
    }
}
