//! Knockout bracket: explicit seeded ties.

use crate::models::game::{MatchId, Phase};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// One knockout pairing, single match or two legs.
///
/// `slot` is the tie's stable position within its phase; the next round is paired by slot,
/// never by scanning match team ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub phase: Phase,
    pub slot: usize,
    /// Better-ranked side (hosts the single match or the second leg).
    pub high_seed: TeamId,
    pub low_seed: TeamId,
    /// Match ids in leg order.
    pub legs: Vec<MatchId>,
}

impl Tie {
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.high_seed == team_id || self.low_seed == team_id
    }

    pub fn is_two_legged(&self) -> bool {
        self.legs.len() == 2
    }
}
