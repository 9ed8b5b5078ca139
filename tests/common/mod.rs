//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use football_tournament_web::{
    create_team, record_result, schedule_group_phase, GameMatch, MatchId, NewPlayer, NewTeam,
    ResultSubmission, TeamId, Tournament,
};

pub fn new_team(name: &str, players: &[(&str, u32)]) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        coach: format!("Coach {name}"),
        phone: "555-0100".to_string(),
        email: None,
        players: players
            .iter()
            .map(|(n, number)| NewPlayer {
                name: n.to_string(),
                number: *number,
            })
            .collect(),
    }
}

/// Tournament with `n` teams named T0..T{n-1}, each with two players (#9 and #4).
pub fn tournament_with_teams(n: usize) -> (Tournament, Vec<TeamId>) {
    let mut t = Tournament::default();
    let ids = (0..n)
        .map(|i| {
            create_team(&mut t, new_team(&format!("T{i}"), &[("Striker", 9), ("Defender", 4)]))
                .unwrap()
                .id
        })
        .collect();
    (t, ids)
}

/// Record a result for an existing fixture.
pub fn play(t: &mut Tournament, match_id: MatchId, home: u32, away: u32) -> GameMatch {
    let m = t.game(match_id).unwrap().clone();
    record_result(
        t,
        ResultSubmission::new(m.home_team_id, m.away_team_id, home.into(), away.into())
            .for_match(match_id),
    )
    .unwrap()
}

/// Schedule the group phase and play it so that a lower registration index always wins 1-0.
/// The resulting standings follow registration order.
pub fn play_group_by_index(t: &mut Tournament, ids: &[TeamId]) {
    let schedule = schedule_group_phase(t).unwrap();
    for m in schedule {
        let home_idx = ids.iter().position(|id| *id == m.home_team_id).unwrap();
        let away_idx = ids.iter().position(|id| *id == m.away_team_id).unwrap();
        if home_idx < away_idx {
            play(t, m.id, 1, 0);
        } else {
            play(t, m.id, 0, 1);
        }
    }
}

pub fn player_id(t: &Tournament, team: TeamId, number: u32) -> football_tournament_web::PlayerId {
    t.team(team)
        .unwrap()
        .players
        .iter()
        .find(|p| p.number == number)
        .unwrap()
        .id
}
