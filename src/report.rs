//! CSV export of the standings table.

use crate::logic::get_standings;
use crate::models::Tournament;
use serde::Serialize;

#[derive(Serialize)]
struct StandingRow<'a> {
    position: usize,
    team: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    points: u32,
}

const HEADER: [&str; 10] = [
    "position",
    "team",
    "played",
    "won",
    "drawn",
    "lost",
    "goals_for",
    "goals_against",
    "goal_difference",
    "points",
];

/// Ranked table as CSV. The header row is written even when no team is registered.
pub fn standings_csv(tournament: &Tournament) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for (i, s) in get_standings(tournament).iter().enumerate() {
        wtr.serialize(StandingRow {
            position: i + 1,
            team: &s.team_name,
            played: s.stats.played,
            won: s.stats.won,
            drawn: s.stats.drawn,
            lost: s.stats.lost,
            goals_for: s.stats.goals_for,
            goals_against: s.stats.goals_against,
            goal_difference: s.stats.goal_difference,
            points: s.stats.points,
        })?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
