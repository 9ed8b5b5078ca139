//! Tournament business logic: registration, scheduling, results, standings, knockouts.

mod knockout;
mod phases;
mod queries;
mod results;
mod schedule;
mod standings;
mod teams;

pub use knockout::{
    aggregate_winner, aggregate_winner_between, bracket_pairings, build_fixtures, champion, phase_winners,
    seed_pairings, tie_legs, tie_winner, Pairing, TieOutcome,
};
pub use phases::{advance, current_phase};
pub use queries::{
    best_defense, knockout_matches, match_details, matches_by_phase, played_matches, top_scorers,
    upcoming_matches, Defense, MatchDetails, Scorer,
};
pub use results::{record_result, PenaltyInput, PlayerStatInput, ResultSubmission};
pub use schedule::{
    delete_match, generate_group_schedule, reschedule_match, schedule_group_phase, schedule_match,
};
pub use standings::{
    compare, get_standings, rank, rebuild_team_stats, standings_from_history, stats_from_history,
    Standing,
};
pub use teams::{create_team, delete_team, update_team, NewPlayer, NewTeam, PlayerUpdate, TeamUpdate};
