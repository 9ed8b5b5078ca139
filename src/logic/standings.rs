//! Standings: ranked group-phase table from live stats or from match history.

use crate::config::TiebreakPolicy;
use crate::models::{GameMatch, Phase, Team, TeamId, TeamStats, Tournament};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of the table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub stats: TeamStats,
}

/// Compare two rows: points desc, goal difference desc, then the policy's final key.
pub fn compare(a: &TeamStats, b: &TeamStats, policy: TiebreakPolicy) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| match policy {
            TiebreakPolicy::GoalsAgainst => a.goals_against.cmp(&b.goals_against),
            TiebreakPolicy::GoalsFor => b.goals_for.cmp(&a.goals_for),
            TiebreakPolicy::GoalDifference => Ordering::Equal,
        })
}

/// Stable sort; fully tied rows keep their input order.
pub fn rank(mut rows: Vec<Standing>, policy: TiebreakPolicy) -> Vec<Standing> {
    rows.sort_by(|a, b| compare(&a.stats, &b.stats, policy));
    rows
}

/// Fast path: rank teams by their running stats.
pub fn get_standings(tournament: &Tournament) -> Vec<Standing> {
    let rows = tournament
        .teams
        .iter()
        .map(|t| Standing {
            team_id: t.id,
            team_name: t.name.clone(),
            stats: t.stats.clone(),
        })
        .collect();
    rank(rows, tournament.config.tiebreak)
}

/// Per-team totals recomputed from played group matches only.
pub fn stats_from_history(teams: &[Team], matches: &[GameMatch]) -> HashMap<TeamId, TeamStats> {
    let mut totals: HashMap<TeamId, TeamStats> =
        teams.iter().map(|t| (t.id, TeamStats::default())).collect();
    for m in matches.iter().filter(|m| m.phase == Phase::Group && m.is_played()) {
        for side in [m.home_team_id, m.away_team_id] {
            if let (Some(stats), Some((gf, ga))) = (totals.get_mut(&side), m.goals_for_against(side)) {
                if let Err(e) = stats.apply(gf, ga) {
                    log::warn!("Skipping match {} for team {} in history totals: {}", m.id, side, e);
                }
            }
        }
    }
    totals
}

/// Audit path: rank teams from raw match history, ignoring running stats.
pub fn standings_from_history(
    teams: &[Team],
    matches: &[GameMatch],
    policy: TiebreakPolicy,
) -> Vec<Standing> {
    let mut totals = stats_from_history(teams, matches);
    let rows = teams
        .iter()
        .map(|t| Standing {
            team_id: t.id,
            team_name: t.name.clone(),
            stats: totals.remove(&t.id).unwrap_or_default(),
        })
        .collect();
    rank(rows, policy)
}

/// Repair path: overwrite every team's running stats with the history recomputation.
/// Returns the number of teams whose stats changed.
pub fn rebuild_team_stats(tournament: &mut Tournament) -> usize {
    let mut totals = stats_from_history(&tournament.teams, &tournament.matches);
    let mut changed = 0;
    for team in &mut tournament.teams {
        let fresh = totals.remove(&team.id).unwrap_or_default();
        if team.stats != fresh {
            log::warn!("Team '{}' stats drifted from match history; rebuilt", team.name);
            team.stats = fresh;
            changed += 1;
        }
    }
    changed
}
