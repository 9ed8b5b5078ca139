//! Engine errors and the taxonomy they map onto.

use crate::models::game::{MatchId, Phase};
use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use serde::Serialize;

/// A reference to a record that could not be found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reference {
    Team(TeamId),
    Player(PlayerId),
    Match(MatchId),
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Team(id) => write!(f, "team {}", id),
            Reference::Player(id) => write!(f, "player {}", id),
            Reference::Match(id) => write!(f, "match {}", id),
        }
    }
}

/// Coarse error category, used by callers to decide user-facing handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    DuplicateName,
    MatchesPending,
    DuplicatePhase,
    UnresolvedTie,
    InsufficientTeams,
    PhaseComplete,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Missing team, player or match.
    NotFound(Reference),
    /// Negative score, same team on both sides, malformed counts, and similar.
    InvalidInput(String),
    /// A team with this name already exists (case-insensitive).
    DuplicateName(String),
    /// The current phase still has matches without a result.
    MatchesPending { phase: Phase, pending: usize },
    /// The target phase already has matches.
    DuplicatePhase(Phase),
    /// A knockout tie is level and no penalty result decides it.
    UnresolvedTie { team_a: TeamId, team_b: TeamId },
    /// Not enough teams to schedule or to seed a knockout round.
    InsufficientTeams { required: usize, available: usize },
    /// The final has already been generated; nothing left to advance to.
    PhaseComplete,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::NotFound(_) => ErrorKind::NotFound,
            TournamentError::InvalidInput(_) => ErrorKind::InvalidInput,
            TournamentError::DuplicateName(_) => ErrorKind::DuplicateName,
            TournamentError::MatchesPending { .. } => ErrorKind::MatchesPending,
            TournamentError::DuplicatePhase(_) => ErrorKind::DuplicatePhase,
            TournamentError::UnresolvedTie { .. } => ErrorKind::UnresolvedTie,
            TournamentError::InsufficientTeams { .. } => ErrorKind::InsufficientTeams,
            TournamentError::PhaseComplete => ErrorKind::PhaseComplete,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TournamentError::InvalidInput(msg.into())
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotFound(r) => write!(f, "Not found: {}", r),
            TournamentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TournamentError::DuplicateName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            TournamentError::MatchesPending { phase, pending } => {
                write!(f, "{} still has {} match(es) without a result", phase, pending)
            }
            TournamentError::DuplicatePhase(phase) => {
                write!(f, "Matches for {} have already been generated", phase)
            }
            TournamentError::UnresolvedTie { team_a, team_b } => write!(
                f,
                "Tie between {} and {} is level; record a penalty result to decide it",
                team_a, team_b
            ),
            TournamentError::InsufficientTeams { required, available } => write!(
                f,
                "Need at least {} teams (have {})",
                required, available
            ),
            TournamentError::PhaseComplete => write!(f, "The tournament is already in the final"),
        }
    }
}

impl std::error::Error for TournamentError {}
