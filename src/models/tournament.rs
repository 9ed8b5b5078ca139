//! Tournament: the aggregate every engine operation reads and writes.

use crate::config::EngineConfig;
use crate::models::bracket::Tie;
use crate::models::error::{Reference, TournamentError};
use crate::models::game::{GameMatch, MatchId, Phase};
use crate::models::player::{MatchPlayerStats, Player, PlayerId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: teams, fixtures, per-match player stats and the knockout bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub teams: Vec<Team>,
    /// All fixtures of every phase, in creation order.
    pub matches: Vec<GameMatch>,
    /// Audit rows backing every player counter increment.
    pub match_player_stats: Vec<MatchPlayerStats>,
    /// Knockout ties of every generated phase.
    pub bracket: Vec<Tie>,
    pub config: EngineConfig,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: Vec::new(),
            matches: Vec::new(),
            match_player_stats: Vec::new(),
            bracket: Vec::new(),
            config,
        }
    }

    /// Run `op` as one unit of work: on error, nothing it changed is kept.
    pub fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        let mut draft = self.clone();
        let out = op(&mut draft)?;
        *self = draft;
        Ok(out)
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::NotFound(Reference::Team(id)))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, TournamentError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::NotFound(Reference::Team(id)))
    }

    pub fn game(&self, id: MatchId) -> Result<&GameMatch, TournamentError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(TournamentError::NotFound(Reference::Match(id)))
    }

    pub fn game_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TournamentError::NotFound(Reference::Match(id)))
    }

    /// Team owning a player.
    pub fn player_team(&self, player_id: PlayerId) -> Result<TeamId, TournamentError> {
        self.teams
            .iter()
            .find(|t| t.player(player_id).is_some())
            .map(|t| t.id)
            .ok_or(TournamentError::NotFound(Reference::Player(player_id)))
    }

    /// Mutable reference to a player in any team.
    pub fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, TournamentError> {
        self.teams
            .iter_mut()
            .find_map(|t| t.player_mut(player_id))
            .ok_or(TournamentError::NotFound(Reference::Player(player_id)))
    }

    /// Matches of one phase, in creation order.
    pub fn matches_in(&self, phase: Phase) -> impl Iterator<Item = &GameMatch> + '_ {
        self.matches.iter().filter(move |m| m.phase == phase)
    }

    /// Bracket ties of one phase, ordered by slot.
    pub fn ties_in(&self, phase: Phase) -> Vec<&Tie> {
        let mut ties: Vec<&Tie> = self.bracket.iter().filter(|t| t.phase == phase).collect();
        ties.sort_by_key(|t| t.slot);
        ties
    }

    /// The tie a knockout match belongs to.
    pub fn tie_of(&self, match_id: MatchId) -> Option<&Tie> {
        self.bracket.iter().find(|t| t.legs.contains(&match_id))
    }

    pub fn has_matches_in(&self, phase: Phase) -> bool {
        self.matches.iter().any(|m| m.phase == phase)
    }

    /// Case-insensitive name lookup (Unicode case folding), optionally ignoring one team (for renames).
    pub(crate) fn name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        let wanted = name.to_lowercase();
        self.teams
            .iter()
            .any(|t| Some(t.id) != except && t.name.to_lowercase() == wanted)
    }
}
