//! Player, StatLine and MatchPlayerStats data structures.

use crate::models::game::MatchId;
use crate::models::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in stat rows and lookups).
pub type PlayerId = Uuid;

/// Goals, fouls and cards. Used both for cumulative counters and per-match deltas.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub goals: u32,
    pub fouls: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub blue_cards: u32,
}

impl StatLine {
    pub fn is_empty(&self) -> bool {
        *self == StatLine::default()
    }

    /// Add a per-match delta. Fails without changing anything if a counter would overflow.
    pub fn add(&mut self, delta: &StatLine) -> Result<(), TournamentError> {
        let sum = |n: u32, by: u32, what: &str| {
            n.checked_add(by)
                .ok_or_else(|| TournamentError::invalid(format!("{} total would overflow", what)))
        };
        *self = StatLine {
            goals: sum(self.goals, delta.goals, "goals")?,
            fouls: sum(self.fouls, delta.fouls, "fouls")?,
            yellow_cards: sum(self.yellow_cards, delta.yellow_cards, "yellow cards")?,
            red_cards: sum(self.red_cards, delta.red_cards, "red cards")?,
            blue_cards: sum(self.blue_cards, delta.blue_cards, "blue cards")?,
        };
        Ok(())
    }

    /// Remove a per-match delta, flooring at zero. An underflow is logged as drift.
    pub fn subtract(&mut self, delta: &StatLine) {
        let mut drifted = false;
        let mut take = |n: u32, by: u32| {
            n.checked_sub(by).unwrap_or_else(|| {
                drifted = true;
                0
            })
        };
        self.goals = take(self.goals, delta.goals);
        self.fouls = take(self.fouls, delta.fouls);
        self.yellow_cards = take(self.yellow_cards, delta.yellow_cards);
        self.red_cards = take(self.red_cards, delta.red_cards);
        self.blue_cards = take(self.blue_cards, delta.blue_cards);
        if drifted {
            log::warn!("Player counters underflow removing {:?}; totals drifted from stat rows", delta);
        }
    }
}

/// A squad member. Counters change only through result recording.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Shirt number, unique within the team.
    pub number: u32,
    #[serde(flatten)]
    pub totals: StatLine,
}

impl Player {
    /// Create a new player with zeroed counters.
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            number,
            totals: StatLine::default(),
        }
    }
}

/// Audit row: what one player recorded in one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayerStats {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub line: StatLine,
}
