//! Team and TeamStats data structures.

use crate::models::player::{Player, PlayerId};
use crate::models::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Result of a match from one side's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        use std::cmp::Ordering::*;
        match goals_for.cmp(&goals_against) {
            Greater => Outcome::Win,
            Equal => Outcome::Draw,
            Less => Outcome::Loss,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// Running group-phase totals for one team.
///
/// Always equal to the sum of [`TeamStats::apply`] over the team's played group matches.
/// `goal_difference` is kept equal to `goals_for - goals_against` by every mutation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl TeamStats {
    /// Add one match's contribution. Fails without changing anything if a total would overflow.
    pub fn apply(&mut self, goals_for: u32, goals_against: u32) -> Result<(), TournamentError> {
        let outcome = Outcome::from_goals(goals_for, goals_against);
        let bump = |n: u32, by: u32, what: &str| {
            n.checked_add(by)
                .ok_or_else(|| TournamentError::invalid(format!("{} total would overflow", what)))
        };
        let mut next = self.clone();
        next.played = bump(self.played, 1, "played")?;
        match outcome {
            Outcome::Win => next.won = bump(self.won, 1, "won")?,
            Outcome::Draw => next.drawn = bump(self.drawn, 1, "drawn")?,
            Outcome::Loss => next.lost = bump(self.lost, 1, "lost")?,
        }
        next.goals_for = bump(self.goals_for, goals_for, "goals for")?;
        next.goals_against = bump(self.goals_against, goals_against, "goals against")?;
        next.points = bump(self.points, outcome.points(), "points")?;
        next.sync_goal_difference();
        *self = next;
        Ok(())
    }

    /// Remove a contribution previously added with the same goals.
    ///
    /// Totals never go below zero; an underflow means the stats drifted from match history
    /// and is logged so `rebuild_team_stats` can be run.
    pub fn reverse(&mut self, goals_for: u32, goals_against: u32) {
        let outcome = Outcome::from_goals(goals_for, goals_against);
        let mut drifted = false;
        let mut take = |n: u32, by: u32| {
            n.checked_sub(by).unwrap_or_else(|| {
                drifted = true;
                0
            })
        };
        self.played = take(self.played, 1);
        match outcome {
            Outcome::Win => self.won = take(self.won, 1),
            Outcome::Draw => self.drawn = take(self.drawn, 1),
            Outcome::Loss => self.lost = take(self.lost, 1),
        }
        self.goals_for = take(self.goals_for, goals_for);
        self.goals_against = take(self.goals_against, goals_against);
        self.points = take(self.points, outcome.points());
        self.sync_goal_difference();
        if drifted {
            log::warn!(
                "Team stats underflow reversing a {}-{} result; totals drifted from match history",
                goals_for,
                goals_against
            );
        }
    }

    fn sync_goal_difference(&mut self) {
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// A registered team with its squad and group-phase totals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub coach: String,
    pub phone: String,
    pub email: Option<String>,
    pub players: Vec<Player>,
    pub stats: TeamStats,
}

impl Team {
    /// Create a team with zeroed stats. Name and squad validation happen in the caller.
    pub fn new(name: impl Into<String>, coach: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coach: coach.into(),
            phone: phone.into(),
            email: None,
            players: Vec::new(),
            stats: TeamStats::default(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }
}
