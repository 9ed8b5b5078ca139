//! Integration tests for the read-only match and statistics views.

mod common;

use chrono::{TimeZone, Utc};
use common::{player_id, tournament_with_teams};
use football_tournament_web::{
    best_defense, knockout_matches, match_details, matches_by_phase, played_matches,
    record_result, schedule_match, top_scorers, upcoming_matches, ErrorKind, GameMatch, MatchId,
    Phase, PlayerStatInput, ResultSubmission, TeamId, Tournament,
};
use uuid::Uuid;

fn ids(games: &[GameMatch]) -> Vec<MatchId> {
    games.iter().map(|m| m.id).collect()
}

fn scored(t: &mut Tournament, m: &GameMatch, home: i64, away: i64, scorer_team: TeamId) {
    let scorer = player_id(t, scorer_team, 9);
    let goals = if scorer_team == m.home_team_id { home } else { away };
    record_result(
        t,
        ResultSubmission::new(m.home_team_id, m.away_team_id, home, away)
            .for_match(m.id)
            .with_player(
                scorer,
                PlayerStatInput {
                    goals,
                    ..Default::default()
                },
            ),
    )
    .unwrap();
}

/// Four teams, three dated or undated fixtures, two of them played.
/// T0 5-0 T1 (8 May), T2 4-1 T0 (1 May), T1 v T2 undated and unplayed. T3 never plays.
fn season() -> (Tournament, Vec<TeamId>, [GameMatch; 3]) {
    let (mut t, teams) = tournament_with_teams(4);
    let early = Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2026, 5, 8, 18, 0, 0).unwrap();
    let a = schedule_match(&mut t, teams[0], teams[1], Some(late)).unwrap();
    let b = schedule_match(&mut t, teams[1], teams[2], None).unwrap();
    let c = schedule_match(&mut t, teams[2], teams[0], Some(early)).unwrap();
    (t, teams, [a, b, c])
}

#[test]
fn upcoming_is_earliest_first_with_undated_last() {
    let (t, _, [a, b, c]) = season();
    assert_eq!(ids(&upcoming_matches(&t)), vec![c.id, a.id, b.id]);
    assert_eq!(matches_by_phase(&t, Phase::Group).len(), 3);
    assert!(knockout_matches(&t).is_empty());
}

#[test]
fn played_is_most_recent_first() {
    let (mut t, teams, [a, b, c]) = season();
    scored(&mut t, &a, 5, 0, teams[0]);
    scored(&mut t, &c, 4, 1, teams[2]);

    assert_eq!(ids(&played_matches(&t)), vec![a.id, c.id]);
    assert_eq!(ids(&upcoming_matches(&t)), vec![b.id]);
}

#[test]
fn details_carry_teams_and_stat_rows() {
    let (mut t, teams, [a, ..]) = season();
    scored(&mut t, &a, 5, 0, teams[0]);

    let details = match_details(&t, a.id).unwrap();
    assert_eq!(details.home_team.name, "T0");
    assert_eq!(details.away_team.name, "T1");
    assert_eq!(details.player_stats.len(), 1);
    assert_eq!(details.player_stats[0].line.goals, 5);
    assert_eq!(match_details(&t, Uuid::new_v4()).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn top_scorers_respect_the_goal_threshold() {
    let (mut t, teams, [a, _, c]) = season();
    scored(&mut t, &a, 5, 0, teams[0]);
    scored(&mut t, &c, 4, 1, teams[2]);

    let names: Vec<String> = top_scorers(&t).into_iter().map(|s| s.team_name).collect();
    assert_eq!(names, ["T0"]);

    t.config.top_scorer_min_goals = 3;
    let goals: Vec<u32> = top_scorers(&t).iter().map(|s| s.player.totals.goals).collect();
    assert_eq!(goals, [5, 4]);
}

#[test]
fn best_defense_skips_idle_and_leaky_teams() {
    let (mut t, teams, [a, _, c]) = season();
    scored(&mut t, &a, 5, 0, teams[0]);
    scored(&mut t, &c, 4, 1, teams[2]);

    // Conceded: T2 1, T0 4, T1 5. T3 has not played.
    let names = |t: &Tournament| -> Vec<String> {
        best_defense(t).into_iter().map(|d| d.team_name).collect()
    };
    assert_eq!(names(&t), ["T2", "T0", "T1"]);

    t.config.best_defense_max_conceded = 4;
    assert_eq!(names(&t), ["T2", "T0"]);
}
