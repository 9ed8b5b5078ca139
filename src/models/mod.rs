//! Data structures for the football tournament: teams, players, matches, bracket, tournament state.

mod bracket;
mod error;
mod game;
mod player;
mod team;
mod tournament;

pub use bracket::Tie;
pub use error::{ErrorKind, Reference, TournamentError};
pub use game::{GameMatch, Leg, MatchId, MatchStatus, Phase, Score};
pub use player::{MatchPlayerStats, Player, PlayerId, StatLine};
pub use team::{Outcome, Team, TeamId, TeamStats};
pub use tournament::{Tournament, TournamentId};
