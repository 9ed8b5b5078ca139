//! Registration: create, update and delete teams with their squads.

use crate::models::{Player, PlayerId, Team, TeamId, Tournament, TournamentError};
use serde::Deserialize;
use std::collections::HashSet;

/// Squad entry for a new team.
#[derive(Clone, Debug, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub number: u32,
}

/// Team registration data.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub coach: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub players: Vec<NewPlayer>,
}

/// Squad entry in an update: `id` set for existing players, None for new ones.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerUpdate {
    #[serde(default)]
    pub id: Option<PlayerId>,
    pub name: String,
    pub number: u32,
}

/// Full replacement of a team's editable fields and squad.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamUpdate {
    pub name: String,
    pub coach: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerUpdate>,
}

/// Register a team with zeroed stats. Names are unique (case-insensitive).
pub fn create_team(tournament: &mut Tournament, data: NewTeam) -> Result<Team, TournamentError> {
    let name = clean_name(&data.name)?;
    if tournament.name_taken(&name, None) {
        return Err(TournamentError::DuplicateName(name));
    }
    check_numbers(data.players.iter().map(|p| p.number))?;

    let mut team = Team::new(name, data.coach, data.phone);
    team.email = data.email;
    for p in data.players {
        team.players.push(Player::new(clean_name(&p.name)?, p.number));
    }

    log::info!("Registered team '{}' with {} player(s)", team.name, team.players.len());
    tournament.teams.push(team.clone());
    Ok(team)
}

/// Update team details and reconcile the squad: update listed players, add new ones, drop the rest.
///
/// A player with recorded match stats cannot be dropped; their counters back the audit trail.
pub fn update_team(
    tournament: &mut Tournament,
    team_id: TeamId,
    data: TeamUpdate,
) -> Result<Team, TournamentError> {
    tournament.atomically(|t| {
        let name = clean_name(&data.name)?;
        if t.name_taken(&name, Some(team_id)) {
            return Err(TournamentError::DuplicateName(name));
        }
        check_numbers(data.players.iter().map(|p| p.number))?;

        let kept: HashSet<PlayerId> = data.players.iter().filter_map(|p| p.id).collect();
        let current: Vec<PlayerId> = t.team(team_id)?.players.iter().map(|p| p.id).collect();
        for id in &kept {
            if !current.contains(id) {
                return Err(TournamentError::invalid(format!(
                    "player {} does not belong to this team",
                    id
                )));
            }
        }
        let dropped: Vec<PlayerId> = current.into_iter().filter(|id| !kept.contains(id)).collect();
        if let Some(id) = dropped
            .iter()
            .find(|id| t.match_player_stats.iter().any(|s| s.player_id == **id))
        {
            return Err(TournamentError::invalid(format!(
                "player {} has recorded match stats and cannot be removed",
                id
            )));
        }

        let team = t.team_mut(team_id)?;
        team.name = name;
        team.coach = data.coach;
        team.phone = data.phone;
        team.email = data.email;
        team.players.retain(|p| !dropped.contains(&p.id));
        for p in data.players {
            let player_name = clean_name(&p.name)?;
            match p.id.and_then(|id| team.player_mut(id)) {
                Some(existing) => {
                    existing.name = player_name;
                    existing.number = p.number;
                }
                None => team.players.push(Player::new(player_name, p.number)),
            }
        }
        log::info!("Updated team '{}' ({} dropped player(s))", team.name, dropped.len());
        Ok(team.clone())
    })
}

/// Delete a team that no match references.
pub fn delete_team(tournament: &mut Tournament, team_id: TeamId) -> Result<(), TournamentError> {
    let name = tournament.team(team_id)?.name.clone();
    let referenced = tournament.matches.iter().filter(|m| m.involves(team_id)).count();
    if referenced > 0 {
        log::warn!("Refusing to delete team '{}': {} match(es) reference it", name, referenced);
        return Err(TournamentError::invalid(format!(
            "team '{}' is referenced by {} match(es)",
            name, referenced
        )));
    }
    tournament.teams.retain(|t| t.id != team_id);
    log::info!("Deleted team '{}'", name);
    Ok(())
}

fn clean_name(raw: &str) -> Result<String, TournamentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::invalid("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_numbers(numbers: impl Iterator<Item = u32>) -> Result<(), TournamentError> {
    let mut seen = HashSet::new();
    for n in numbers {
        if !seen.insert(n) {
            return Err(TournamentError::invalid(format!("shirt number {} is used twice", n)));
        }
    }
    Ok(())
}
