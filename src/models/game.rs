//! Match (game), Phase, MatchStatus and Leg.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Tournament stage. Ordered from earliest to latest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Group,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl Phase {
    /// All phases, earliest first.
    pub const ALL: [Phase; 4] = [
        Phase::Group,
        Phase::QuarterFinal,
        Phase::SemiFinal,
        Phase::Final,
    ];

    pub fn is_knockout(self) -> bool {
        self != Phase::Group
    }

    /// Knockout phase that follows this one, or None after the final.
    pub fn next_knockout(self) -> Option<Phase> {
        match self {
            Phase::Group => Some(Phase::QuarterFinal),
            Phase::QuarterFinal => Some(Phase::SemiFinal),
            Phase::SemiFinal => Some(Phase::Final),
            Phase::Final => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Group => "GROUP",
            Phase::QuarterFinal => "QUARTER_FINAL",
            Phase::SemiFinal => "SEMI_FINAL",
            Phase::Final => "FINAL",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Played,
}

/// One of the two matches of a two-legged tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    First,
    Second,
}

/// Goals (or penalty kicks) scored by the home and away side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn is_level(&self) -> bool {
        self.home == self.away
    }
}

/// A single fixture between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub phase: Phase,
    /// Set only for two-legged knockout ties.
    pub leg: Option<Leg>,
    /// Group round number from the schedule generator.
    pub round: Option<u32>,
    /// None means "to be scheduled".
    pub date: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    /// None until played; both sides are always set together.
    pub score: Option<Score>,
    /// Shoot-out result deciding a level knockout match or tie.
    pub penalties: Option<Score>,
}

impl GameMatch {
    /// A scheduled, undated match with no result.
    pub fn new(home_team_id: TeamId, away_team_id: TeamId, phase: Phase) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team_id,
            away_team_id,
            phase,
            leg: None,
            round: None,
            date: None,
            status: MatchStatus::Scheduled,
            score: None,
            penalties: None,
        }
    }

    pub fn with_leg(mut self, leg: Leg) -> Self {
        self.leg = Some(leg);
        self
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.date = date;
        self
    }

    pub fn is_played(&self) -> bool {
        self.status == MatchStatus::Played && self.score.is_some()
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals scored and conceded by `team_id` in this match, if played and involved.
    pub fn goals_for_against(&self, team_id: TeamId) -> Option<(u32, u32)> {
        let score = self.score?;
        if team_id == self.home_team_id {
            Some((score.home, score.away))
        } else if team_id == self.away_team_id {
            Some((score.away, score.home))
        } else {
            None
        }
    }

    /// Penalty kicks scored by `team_id`, if a shoot-out was recorded.
    pub fn penalties_for(&self, team_id: TeamId) -> Option<u32> {
        let p = self.penalties?;
        if team_id == self.home_team_id {
            Some(p.home)
        } else if team_id == self.away_team_id {
            Some(p.away)
        } else {
            None
        }
    }
}
