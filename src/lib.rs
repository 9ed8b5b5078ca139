//! Football tournament web app: library with models, configuration and the progression engine.

pub mod config;
pub mod logic;
pub mod models;
pub mod report;

pub use config::{EngineConfig, ServerConfig, TiebreakPolicy};
pub use logic::{
    advance, aggregate_winner, aggregate_winner_between, best_defense, champion, create_team,
    current_phase, delete_match, delete_team, generate_group_schedule, get_standings,
    knockout_matches, match_details, matches_by_phase, played_matches, rebuild_team_stats,
    record_result, reschedule_match, schedule_group_phase, schedule_match, standings_from_history,
    top_scorers, upcoming_matches, update_team, NewPlayer, NewTeam, PlayerStatInput, PlayerUpdate,
    ResultSubmission, Standing, TeamUpdate, TieOutcome,
};
pub use models::{
    ErrorKind, GameMatch, Leg, MatchId, MatchPlayerStats, MatchStatus, Phase, Player, PlayerId,
    Reference, Score, StatLine, Team, TeamId, TeamStats, Tie, Tournament, TournamentError,
    TournamentId,
};
pub use report::standings_csv;
