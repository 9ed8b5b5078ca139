//! Integration tests for result recording, edits and reversal.

mod common;

use common::{play, play_group_by_index, player_id, tournament_with_teams};
use football_tournament_web::logic::stats_from_history;
use football_tournament_web::{
    advance, record_result, schedule_group_phase, ErrorKind, MatchStatus, Phase, PlayerStatInput,
    ResultSubmission, StatLine, TeamStats, Tournament,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

fn goals(n: i64) -> PlayerStatInput {
    PlayerStatInput {
        goals: n,
        ..Default::default()
    }
}

fn assert_consistent(t: &Tournament) {
    let history = stats_from_history(&t.teams, &t.matches);
    for team in &t.teams {
        assert_eq!(team.stats, history[&team.id], "team {} drifted", team.name);
        assert_eq!(
            team.stats.goal_difference,
            i64::from(team.stats.goals_for) - i64::from(team.stats.goals_against)
        );
        for p in &team.players {
            let from_rows: u32 = t
                .match_player_stats
                .iter()
                .filter(|s| s.player_id == p.id)
                .map(|s| s.line.goals)
                .sum();
            assert_eq!(p.totals.goals, from_rows, "player {} drifted", p.name);
        }
    }
}

#[test]
fn first_result_marks_match_played_and_updates_both_teams() {
    let (mut t, teams) = tournament_with_teams(2);
    let schedule = schedule_group_phase(&mut t).unwrap();
    let m = play(&mut t, schedule[0].id, 3, 1);

    assert_eq!(m.status, MatchStatus::Played);
    let (home, away) = (m.home_team_id, m.away_team_id);
    let home_stats = &t.team(home).unwrap().stats;
    assert_eq!(
        *home_stats,
        TeamStats {
            played: 1,
            won: 1,
            drawn: 0,
            lost: 0,
            goals_for: 3,
            goals_against: 1,
            goal_difference: 2,
            points: 3,
        }
    );
    let away_stats = &t.team(away).unwrap().stats;
    assert_eq!(away_stats.lost, 1);
    assert_eq!(away_stats.points, 0);
    assert_eq!(away_stats.goal_difference, -2);
    assert!(teams.contains(&home) && teams.contains(&away));
}

#[test]
fn result_without_match_id_creates_a_played_group_match() {
    let (mut t, teams) = tournament_with_teams(2);
    let m = record_result(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 1)).unwrap();
    assert_eq!(m.phase, Phase::Group);
    assert!(m.is_played());
    assert!(m.date.is_some());
    assert_eq!(t.matches.len(), 1);
    assert_eq!(t.team(teams[0]).unwrap().stats.drawn, 1);
    assert_eq!(t.team(teams[1]).unwrap().stats.points, 1);
}

#[test]
fn recording_the_same_result_twice_is_idempotent() {
    let (mut t, teams) = tournament_with_teams(2);
    let schedule = schedule_group_phase(&mut t).unwrap();
    let m = &schedule[0];
    let scorer = player_id(&t, m.home_team_id, 9);
    let submission = ResultSubmission::new(m.home_team_id, m.away_team_id, 2, 0)
        .for_match(m.id)
        .with_player(scorer, goals(2));

    record_result(&mut t, submission.clone()).unwrap();
    let once = t.teams.clone();
    let rows_once = t.match_player_stats.clone();

    record_result(&mut t, submission).unwrap();
    assert_eq!(t.teams, once);
    assert_eq!(t.match_player_stats, rows_once);
    assert_eq!(t.team(teams[0]).unwrap().stats.played + t.team(teams[1]).unwrap().stats.played, 2);
}

#[test]
fn editing_a_score_reverses_the_previous_contribution() {
    // A 3-0 B, later corrected to 2-2.
    let (mut t, teams) = tournament_with_teams(2);
    let (a, b) = (teams[0], teams[1]);
    let m = record_result(&mut t, ResultSubmission::new(a, b, 3, 0)).unwrap();
    let before_a = t.team(a).unwrap().stats.clone();
    let before_b = t.team(b).unwrap().stats.clone();

    record_result(&mut t, ResultSubmission::new(a, b, 2, 2).for_match(m.id)).unwrap();
    let after_a = &t.team(a).unwrap().stats;
    let after_b = &t.team(b).unwrap().stats;

    assert_eq!(after_a.goals_for as i64 - before_a.goals_for as i64, -1);
    assert_eq!(after_a.goals_against as i64 - before_a.goals_against as i64, 2);
    assert_eq!((before_a.points, after_a.points), (3, 1));
    assert_eq!((after_a.won, after_a.drawn, after_a.played), (0, 1, 1));

    assert_eq!(after_b.goals_for as i64 - before_b.goals_for as i64, 2);
    assert_eq!(after_b.goals_against as i64 - before_b.goals_against as i64, -1);
    assert_eq!((before_b.points, after_b.points), (0, 1));
    assert_eq!((after_b.lost, after_b.drawn, after_b.played), (0, 1, 1));
}

#[test]
fn editing_player_stats_replaces_the_audit_rows() {
    let (mut t, teams) = tournament_with_teams(2);
    let striker = player_id(&t, teams[0], 9);
    let defender = player_id(&t, teams[0], 4);
    let m = record_result(
        &mut t,
        ResultSubmission::new(teams[0], teams[1], 2, 0)
            .with_player(striker, goals(2))
            .with_player(
                defender,
                PlayerStatInput {
                    fouls: 1,
                    yellow_cards: 1,
                    ..Default::default()
                },
            ),
    )
    .unwrap();
    assert_eq!(t.match_player_stats.len(), 2);

    record_result(
        &mut t,
        ResultSubmission::new(teams[0], teams[1], 1, 0)
            .for_match(m.id)
            .with_player(striker, goals(1))
            .with_player(defender, PlayerStatInput::default()),
    )
    .unwrap();

    let team = t.team(teams[0]).unwrap();
    let s = team.player(striker).unwrap();
    let d = team.player(defender).unwrap();
    assert_eq!(s.totals.goals, 1);
    assert_eq!((d.totals.fouls, d.totals.yellow_cards), (0, 0));
    // All-zero lines leave no row behind.
    assert_eq!(t.match_player_stats.len(), 1);
    assert_eq!(t.match_player_stats[0].player_id, striker);
}

#[test]
fn invalid_input_is_rejected() {
    let (mut t, teams) = tournament_with_teams(3);
    let kind = |t: &mut Tournament, sub| record_result(t, sub).unwrap_err().kind();

    assert_eq!(kind(&mut t, ResultSubmission::new(teams[0], teams[1], -1, 0)), ErrorKind::InvalidInput);
    assert_eq!(kind(&mut t, ResultSubmission::new(teams[0], teams[0], 1, 0)), ErrorKind::InvalidInput);
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], Uuid::new_v4(), 1, 0)),
        ErrorKind::NotFound
    );
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 0).for_match(Uuid::new_v4())),
        ErrorKind::NotFound
    );
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 0).with_player(Uuid::new_v4(), goals(1))),
        ErrorKind::NotFound
    );
    let scorer = player_id(&t, teams[0], 9);
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 0).with_player(scorer, goals(-2))),
        ErrorKind::InvalidInput
    );
    let outsider = player_id(&t, teams[2], 9);
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 0).with_player(outsider, goals(1))),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        kind(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 1).with_penalties(4, 3)),
        ErrorKind::InvalidInput
    );
    assert!(t.matches.is_empty());
}

#[test]
fn fixture_teams_must_match_the_submission() {
    let (mut t, teams) = tournament_with_teams(3);
    let schedule = schedule_group_phase(&mut t).unwrap();
    let m = &schedule[0];
    let err = record_result(
        &mut t,
        ResultSubmission::new(m.away_team_id, m.home_team_id, 1, 0).for_match(m.id),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(teams.iter().all(|id| t.team(*id).unwrap().stats.played == 0));
}

#[test]
fn failed_edit_leaves_previous_result_untouched() {
    let (mut t, teams) = tournament_with_teams(2);
    let scorer = player_id(&t, teams[0], 9);
    let m = record_result(
        &mut t,
        ResultSubmission::new(teams[0], teams[1], 2, 1).with_player(scorer, goals(2)),
    )
    .unwrap();
    let teams_before = t.teams.clone();
    let matches_before = t.matches.clone();
    let rows_before = t.match_player_stats.clone();

    // Valid score, but one unknown player fails the whole submission.
    let err = record_result(
        &mut t,
        ResultSubmission::new(teams[0], teams[1], 0, 0)
            .for_match(m.id)
            .with_player(scorer, goals(0))
            .with_player(Uuid::new_v4(), goals(1)),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(t.teams, teams_before);
    assert_eq!(t.matches, matches_before);
    assert_eq!(t.match_player_stats, rows_before);
}

#[test]
fn knockout_results_never_touch_team_stats() {
    let (mut t, teams) = tournament_with_teams(2);
    play_group_by_index(&mut t, &teams);
    let before = t.teams.clone();

    let final_match = advance(&mut t).unwrap().remove(0);
    assert_eq!(final_match.phase, Phase::Final);
    let scorer = player_id(&t, final_match.home_team_id, 9);
    record_result(
        &mut t,
        ResultSubmission::new(final_match.home_team_id, final_match.away_team_id, 4, 0)
            .for_match(final_match.id)
            .with_player(scorer, goals(4)),
    )
    .unwrap();

    for (old, new) in before.iter().zip(&t.teams) {
        assert_eq!(old.stats, new.stats);
    }
    // Player counters still follow knockout goals.
    let team = t.team(final_match.home_team_id).unwrap();
    assert_eq!(team.player(scorer).unwrap().totals.goals, 4);
}

#[test]
fn random_edit_histories_converge_to_match_history() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let (mut t, _) = tournament_with_teams(5);
    let schedule = schedule_group_phase(&mut t).unwrap();

    for _ in 0..300 {
        let m = &schedule[rng.gen_range(0..schedule.len())];
        let home = rng.gen_range(0..5);
        let away = rng.gen_range(0..5);
        let mut sub = ResultSubmission::new(m.home_team_id, m.away_team_id, home, away).for_match(m.id);
        if home > 0 {
            let number = if rng.gen_bool(0.5) { 9 } else { 4 };
            sub = sub.with_player(player_id(&t, m.home_team_id, number), goals(home));
        }
        if away > 0 {
            sub = sub.with_player(player_id(&t, m.away_team_id, 9), goals(away));
        }
        record_result(&mut t, sub).unwrap();
        assert_consistent(&t);
    }

    let played = t.matches.iter().filter(|m| m.is_played()).count() as u32;
    let total_played: u32 = t.teams.iter().map(|team| team.stats.played).sum();
    assert_eq!(total_played, played * 2);
}

#[test]
fn overflowing_totals_are_rejected_without_side_effects() {
    let (mut t, teams) = tournament_with_teams(3);
    record_result(&mut t, ResultSubmission::new(teams[0], teams[1], 3_000_000_000, 0)).unwrap();
    let teams_before = t.teams.clone();

    let err = record_result(&mut t, ResultSubmission::new(teams[0], teams[2], 3_000_000_000, 0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(t.teams, teams_before);
    assert_eq!(t.matches.len(), 1);
    assert_consistent(&t);
}

#[test]
fn overflowing_player_counters_are_rejected() {
    let (mut t, teams) = tournament_with_teams(3);
    let scorer = player_id(&t, teams[0], 9);
    let big = goals(3_000_000_000);
    record_result(&mut t, ResultSubmission::new(teams[0], teams[1], 1, 0).with_player(scorer, big))
        .unwrap();

    let err = record_result(
        &mut t,
        ResultSubmission::new(teams[0], teams[2], 1, 0).with_player(scorer, big),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(t.team(teams[0]).unwrap().player(scorer).unwrap().totals.goals, 3_000_000_000);
    assert_eq!(t.match_player_stats.len(), 1);
}

#[test]
fn reversing_more_than_was_recorded_floors_at_zero() {
    let mut stats = TeamStats::default();
    stats.apply(1, 0).unwrap();
    stats.reverse(4, 2);
    assert_eq!(
        stats,
        TeamStats {
            played: 0,
            won: 0,
            goal_difference: 0,
            ..Default::default()
        }
    );

    let mut line = StatLine {
        goals: 1,
        ..Default::default()
    };
    line.subtract(&StatLine {
        goals: 3,
        fouls: 1,
        ..Default::default()
    });
    assert!(line.is_empty());
}
