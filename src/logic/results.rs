//! Result ledger: record or edit a match result and keep every aggregate consistent.
//!
//! Each submission runs as one unit of work:
//! 1. When editing a played match, undo its player stat rows and (group only) its team stats.
//! 2. Create the match or write the new score.
//! 3. Insert stat rows for players with any non-zero stat and bump their counters.
//! 4. For group matches, add the new outcome to both teams' stats.
//!
//! Submitting the same result twice leaves the same totals as submitting it once.

use crate::models::{
    GameMatch, Leg, MatchId, MatchPlayerStats, MatchStatus, Phase, PlayerId, Score, StatLine,
    TeamId, Tournament, TournamentError,
};
use chrono::Utc;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-player counts as submitted. Signed so malformed input can be rejected explicitly.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerStatInput {
    pub goals: i64,
    pub fouls: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub blue_cards: i64,
}

impl PlayerStatInput {
    fn to_line(self, player_id: PlayerId) -> Result<StatLine, TournamentError> {
        let count = |n: i64, what: &str| {
            u32::try_from(n).map_err(|_| {
                TournamentError::invalid(format!("player {}: {} must be non-negative, got {}", player_id, what, n))
            })
        };
        Ok(StatLine {
            goals: count(self.goals, "goals")?,
            fouls: count(self.fouls, "fouls")?,
            yellow_cards: count(self.yellow_cards, "yellow cards")?,
            red_cards: count(self.red_cards, "red cards")?,
            blue_cards: count(self.blue_cards, "blue cards")?,
        })
    }
}

/// Shoot-out result as submitted.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PenaltyInput {
    pub home: i64,
    pub away: i64,
}

/// A result to record. Without `match_id` a new group match is created.
#[derive(Clone, Debug, Deserialize)]
pub struct ResultSubmission {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: i64,
    pub away_score: i64,
    #[serde(default)]
    pub penalties: Option<PenaltyInput>,
    #[serde(default)]
    pub player_stats: BTreeMap<PlayerId, PlayerStatInput>,
}

impl ResultSubmission {
    pub fn new(home_team_id: TeamId, away_team_id: TeamId, home_score: i64, away_score: i64) -> Self {
        Self {
            match_id: None,
            home_team_id,
            away_team_id,
            home_score,
            away_score,
            penalties: None,
            player_stats: BTreeMap::new(),
        }
    }

    /// Edit (or first-submit) an existing match.
    pub fn for_match(mut self, match_id: MatchId) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn with_penalties(mut self, home: i64, away: i64) -> Self {
        self.penalties = Some(PenaltyInput { home, away });
        self
    }

    pub fn with_player(mut self, player_id: PlayerId, stats: PlayerStatInput) -> Self {
        self.player_stats.insert(player_id, stats);
        self
    }
}

/// Record or edit a match result. All-or-nothing.
pub fn record_result(
    tournament: &mut Tournament,
    submission: ResultSubmission,
) -> Result<GameMatch, TournamentError> {
    tournament.atomically(|t| apply_submission(t, submission))
}

fn apply_submission(
    t: &mut Tournament,
    sub: ResultSubmission,
) -> Result<GameMatch, TournamentError> {
    let score = score_from(sub.home_score, sub.away_score, "score")?;
    if sub.home_team_id == sub.away_team_id {
        return Err(TournamentError::invalid("home and away team must differ"));
    }
    t.team(sub.home_team_id)?;
    t.team(sub.away_team_id)?;

    let mut lines = Vec::with_capacity(sub.player_stats.len());
    for (&player_id, input) in &sub.player_stats {
        let line = input.to_line(player_id)?;
        let team_id = t.player_team(player_id)?;
        if team_id != sub.home_team_id && team_id != sub.away_team_id {
            return Err(TournamentError::invalid(format!(
                "player {} plays for neither side",
                player_id
            )));
        }
        if !line.is_empty() {
            lines.push((player_id, line));
        }
    }

    let previous = match sub.match_id {
        Some(id) => Some(t.game(id)?.clone()),
        None => None,
    };
    let phase = previous.as_ref().map_or(Phase::Group, |m| m.phase);
    if let Some(prev) = &previous {
        if prev.home_team_id != sub.home_team_id || prev.away_team_id != sub.away_team_id {
            return Err(TournamentError::invalid(
                "teams do not match the scheduled fixture",
            ));
        }
    }
    check_not_superseded(t, phase, previous.is_none())?;
    let penalties = penalties_for(phase, previous.as_ref(), sub.penalties)?;

    if let Some(prev) = previous.as_ref().filter(|m| m.is_played()) {
        reverse_result(t, prev)?;
    }

    let game = match &previous {
        Some(prev) => {
            let game = t.game_mut(prev.id)?;
            game.score = Some(score);
            game.penalties = penalties;
            game.status = MatchStatus::Played;
            game.clone()
        }
        None => {
            let mut game = GameMatch::new(sub.home_team_id, sub.away_team_id, Phase::Group)
                .with_date(Some(Utc::now()));
            game.score = Some(score);
            game.status = MatchStatus::Played;
            t.matches.push(game.clone());
            game
        }
    };

    for (player_id, line) in lines {
        t.player_mut(player_id)?.totals.add(&line)?;
        t.match_player_stats.push(MatchPlayerStats {
            match_id: game.id,
            player_id,
            line,
        });
    }

    if game.phase == Phase::Group {
        t.team_mut(game.home_team_id)?.stats.apply(score.home, score.away)?;
        t.team_mut(game.away_team_id)?.stats.apply(score.away, score.home)?;
    }

    log::info!(
        "{} result {} {}-{} {} ({})",
        if previous.as_ref().is_some_and(|m| m.is_played()) { "Edited" } else { "Recorded" },
        team_name(t, game.home_team_id),
        score.home,
        score.away,
        team_name(t, game.away_team_id),
        game.phase
    );
    Ok(game)
}

/// Undo everything a played match contributed: player counters, stat rows, group team stats.
fn reverse_result(t: &mut Tournament, prev: &GameMatch) -> Result<(), TournamentError> {
    let (rows, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut t.match_player_stats)
        .into_iter()
        .partition(|s| s.match_id == prev.id);
    t.match_player_stats = rest;
    for row in &rows {
        t.player_mut(row.player_id)?.totals.subtract(&row.line);
    }

    if let (Phase::Group, Some(score)) = (prev.phase, prev.score) {
        t.team_mut(prev.home_team_id)?.stats.reverse(score.home, score.away);
        t.team_mut(prev.away_team_id)?.stats.reverse(score.away, score.home);
    }
    log::debug!("Reversed {} stat row(s) of match {}", rows.len(), prev.id);
    Ok(())
}

/// A knockout result cannot change once the following round exists, and no new group
/// match can be added after knockouts have started.
fn check_not_superseded(t: &Tournament, phase: Phase, creating: bool) -> Result<(), TournamentError> {
    if creating {
        if let Some(p) = Phase::ALL.into_iter().filter(|p| p.is_knockout()).find(|p| t.has_matches_in(*p)) {
            return Err(TournamentError::DuplicatePhase(p));
        }
    } else if phase.is_knockout() {
        if let Some(next) = phase.next_knockout().filter(|n| t.has_matches_in(*n)) {
            return Err(TournamentError::DuplicatePhase(next));
        }
    }
    Ok(())
}

/// Validate a shoot-out: knockout only, never on a first leg, never level.
fn penalties_for(
    phase: Phase,
    game: Option<&GameMatch>,
    input: Option<PenaltyInput>,
) -> Result<Option<Score>, TournamentError> {
    let Some(p) = input else {
        return Ok(None);
    };
    if !phase.is_knockout() {
        return Err(TournamentError::invalid("penalties only apply to knockout matches"));
    }
    if game.is_some_and(|g| g.leg == Some(Leg::First)) {
        return Err(TournamentError::invalid("penalties are decided in the second leg"));
    }
    let score = score_from(p.home, p.away, "penalties")?;
    if score.is_level() {
        return Err(TournamentError::invalid("a penalty shoot-out cannot end level"));
    }
    Ok(Some(score))
}

fn score_from(home: i64, away: i64, what: &str) -> Result<Score, TournamentError> {
    let side = |n: i64| {
        u32::try_from(n)
            .map_err(|_| TournamentError::invalid(format!("{} must be non-negative, got {}", what, n)))
    };
    Ok(Score::new(side(home)?, side(away)?))
}

fn team_name(t: &Tournament, id: TeamId) -> String {
    t.team(id).map(|team| team.name.clone()).unwrap_or_else(|_| id.to_string())
}
