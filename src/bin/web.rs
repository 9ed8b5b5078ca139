//! Single binary web server: JSON API over one in-memory tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Engine settings: TIEBREAK, TOP_SCORER_MIN_GOALS, BEST_DEFENSE_MAX_CONCEDED.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use football_tournament_web::{
    advance, aggregate_winner_between, best_defense, champion, create_team, current_phase,
    delete_match, delete_team, get_standings, knockout_matches, match_details, matches_by_phase,
    played_matches, rebuild_team_stats, record_result, reschedule_match, schedule_group_phase,
    schedule_match, standings_csv, top_scorers, upcoming_matches, update_team, EngineConfig,
    ErrorKind, MatchId, NewTeam, Phase, ResultSubmission, ServerConfig, TeamId, TeamUpdate,
    Tournament, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Every mutation holds the write guard for its whole unit of work.
type AppState = Data<RwLock<Tournament>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ScheduleMatchBody {
    home_team_id: TeamId,
    away_team_id: TeamId,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RescheduleBody {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Deserialize)]
struct PhasePath {
    phase: Phase,
}

#[derive(Deserialize)]
struct AggregatePath {
    team_a: TeamId,
    team_b: TeamId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidInput => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::Conflict().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(v) => HttpResponse::Ok().json(v),
        Err(e) => {
            log::warn!("Request rejected: {}", e);
            error_response(&e)
        }
    }
}

fn read<F>(state: &AppState, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    match state.read() {
        Ok(guard) => f(&guard),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

fn write<F>(state: &AppState, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    match state.write() {
        Ok(mut guard) => f(&mut guard),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-tournament-web",
    })
}

/// Whole tournament state.
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(t))
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(&t.teams))
}

#[get("/api/teams/{id}")]
async fn api_get_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    read(&state, |t| respond(t.team(path.id)))
}

/// Register a team with its squad.
#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<NewTeam>) -> HttpResponse {
    write(&state, |t| respond(create_team(t, body.into_inner())))
}

#[put("/api/teams/{id}")]
async fn api_update_team(state: AppState, path: Path<TeamPath>, body: Json<TeamUpdate>) -> HttpResponse {
    write(&state, |t| respond(update_team(t, path.id, body.into_inner())))
}

/// Delete a team no match references.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    write(&state, |t| respond(delete_team(t, path.id)))
}

/// Round-robin schedule for all registered teams.
#[post("/api/schedule/group")]
async fn api_schedule_group(state: AppState) -> HttpResponse {
    write(&state, |t| respond(schedule_group_phase(t)))
}

#[post("/api/matches")]
async fn api_schedule_match(state: AppState, body: Json<ScheduleMatchBody>) -> HttpResponse {
    write(&state, |t| {
        respond(schedule_match(t, body.home_team_id, body.away_team_id, body.date))
    })
}

#[get("/api/matches/upcoming")]
async fn api_upcoming_matches(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(upcoming_matches(t)))
}

#[get("/api/matches/played")]
async fn api_played_matches(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(played_matches(t)))
}

#[get("/api/matches/knockout")]
async fn api_knockout_matches(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(knockout_matches(t)))
}

#[get("/api/matches/phase/{phase}")]
async fn api_matches_by_phase(state: AppState, path: Path<PhasePath>) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(matches_by_phase(t, path.phase)))
}

#[get("/api/matches/{id}")]
async fn api_match_details(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    read(&state, |t| respond(match_details(t, path.id)))
}

#[put("/api/matches/{id}/date")]
async fn api_reschedule_match(state: AppState, path: Path<MatchPath>, body: Json<RescheduleBody>) -> HttpResponse {
    write(&state, |t| respond(reschedule_match(t, path.id, body.date)))
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    write(&state, |t| respond(delete_match(t, path.id)))
}

/// Record or edit a result (scores, optional penalties, per-player stats).
#[post("/api/results")]
async fn api_record_result(state: AppState, body: Json<ResultSubmission>) -> HttpResponse {
    write(&state, |t| respond(record_result(t, body.into_inner())))
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(get_standings(t)))
}

#[get("/api/standings.csv")]
async fn api_standings_csv(state: AppState) -> HttpResponse {
    read(&state, |t| match standings_csv(t) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => {
            log::error!("Standings export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    })
}

/// Recompute team stats from match history and report how many teams changed.
#[post("/api/standings/rebuild")]
async fn api_rebuild_standings(state: AppState) -> HttpResponse {
    write(&state, |t| {
        let changed = rebuild_team_stats(t);
        HttpResponse::Ok().json(serde_json::json!({ "changed": changed }))
    })
}

#[get("/api/phase")]
async fn api_current_phase(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(serde_json::json!({ "phase": current_phase(t) })))
}

/// Generate the next phase's fixtures.
#[post("/api/phase/advance")]
async fn api_advance(state: AppState) -> HttpResponse {
    write(&state, |t| respond(advance(t)))
}

#[get("/api/aggregate/{team_a}/{team_b}")]
async fn api_aggregate(state: AppState, path: Path<AggregatePath>) -> HttpResponse {
    read(&state, |t| respond(aggregate_winner_between(t, path.team_a, path.team_b)))
}

#[get("/api/champion")]
async fn api_champion(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(serde_json::json!({ "team_id": champion(t) })))
}

#[get("/api/stats/top-scorers")]
async fn api_top_scorers(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(top_scorers(t)))
}

#[get("/api/stats/best-defense")]
async fn api_best_defense(state: AppState) -> HttpResponse {
    read(&state, |t| HttpResponse::Ok().json(best_defense(t)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server = ServerConfig::from_env();
    let engine = EngineConfig::from_env();
    log::info!("Engine config: {:?}", engine);
    log::info!("Starting server at http://{}:{}", server.host, server.port);

    let state = Data::new(RwLock::new(Tournament::new(engine)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_list_teams)
            .service(api_get_team)
            .service(api_create_team)
            .service(api_update_team)
            .service(api_delete_team)
            .service(api_schedule_group)
            .service(api_schedule_match)
            // Fixed segments before /api/matches/{id}.
            .service(api_upcoming_matches)
            .service(api_played_matches)
            .service(api_knockout_matches)
            .service(api_matches_by_phase)
            .service(api_match_details)
            .service(api_reschedule_match)
            .service(api_delete_match)
            .service(api_record_result)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_rebuild_standings)
            .service(api_current_phase)
            .service(api_advance)
            .service(api_aggregate)
            .service(api_champion)
            .service(api_top_scorers)
            .service(api_best_defense)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
