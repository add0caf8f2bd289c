//! Single binary web server: organizer commands and rankings over a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! DEFAULT_MAX_TEAMS, DEFAULT_TEAMS_PER_GROUP.
//!
//! Tournaments and rankings live in memory. Every command reads the whole tournament,
//! runs an engine function on it and stores the whole new snapshot.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    approve_registration, assign_knockout_slot, configure, create_tournament, edit_group_score,
    generate_groups, generate_knockout_seeded, logic::ranking::find_ranking, ranking_to_csv,
    record_group_score, record_knockout_score, register_team, reject_registration,
    simulate_remaining, MatchId, Outcome, RankingEntry, RegistrationId, Seeding, ServerConfig,
    Slot, TeamId, TeamPlayer, Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage: the only writer of tournaments and rankings.
#[derive(Default)]
struct Store {
    tournaments: HashMap<TournamentId, Tournament>,
    rankings: Vec<RankingEntry>,
}

type AppState = Data<RwLock<Store>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    name: String,
    category: String,
    max_teams: Option<usize>,
    teams_per_group: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTeamBody {
    team_name: String,
    players: Vec<TeamPlayer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsBody {
    max_teams: usize,
    teams_per_group: usize,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateGroupsBody {
    #[serde(default)]
    confirm_uneven: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateKnockoutBody {
    #[serde(default)]
    manual_seeding: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    match_id: MatchId,
    score: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotBody {
    match_id: MatchId,
    slot: Slot,
    team_id: TeamId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and registration id.
#[derive(Deserialize)]
struct RegistrationPath {
    id: TournamentId,
    registration_id: RegistrationId,
}

#[derive(Deserialize)]
struct CategoryPath {
    category: String,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn rejected(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn bad_request(id: TournamentId, e: TournamentError) -> HttpResponse {
    log::warn!("Rejected command on tournament {}: {}", id, e);
    rejected(&e)
}

/// Run `command` against the stored snapshot and store what it returns.
///
/// When the outcome carries updated rankings they replace the stored list in the same write.
fn run_command<F>(state: &AppState, id: TournamentId, command: F) -> HttpResponse
where
    F: FnOnce(&Tournament, &[RankingEntry]) -> Result<Outcome, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let current = match g.tournaments.get(&id) {
        Some(t) => t,
        None => return not_found(),
    };
    match command(current, &g.rankings) {
        Ok(Outcome {
            tournament,
            rankings,
        }) => {
            if let Some(rankings) = rankings {
                g.rankings = rankings;
            }
            let response = HttpResponse::Ok().json(&tournament);
            g.tournaments.insert(id, tournament);
            response
        }
        Err(e) => bad_request(id, e),
    }
}

/// `run_command` for commands that never touch rankings.
fn run_simple<F>(state: &AppState, id: TournamentId, command: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
{
    run_command(state, id, |t, _| {
        command(t).map(|tournament| Outcome {
            tournament,
            rankings: None,
        })
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let tournament = match create_tournament(
        &body.name,
        &body.category,
        body.max_teams.unwrap_or(config.default_max_teams),
        body.teams_per_group.unwrap_or(config.default_teams_per_group),
    ) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Rejected tournament '{}': {}", body.name, e);
            return rejected(&e);
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.tournaments.insert(tournament.id, tournament);
    response
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournaments.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Submit a registration (RegistrationOpen only). Returns the new registration id and tournament.
#[post("/api/tournaments/{id}/registrations")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let current = match g.tournaments.get(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match register_team(current, &body.team_name, body.players) {
        Ok((tournament, registration_id)) => {
            let response = HttpResponse::Ok().json(serde_json::json!({
                "registrationId": registration_id,
                "tournament": &tournament,
            }));
            g.tournaments.insert(path.id, tournament);
            response
        }
        Err(e) => bad_request(path.id, e),
    }
}

#[post("/api/tournaments/{id}/registrations/{registration_id}/approve")]
async fn api_approve_registration(state: AppState, path: Path<RegistrationPath>) -> HttpResponse {
    run_simple(&state, path.id, |t| approve_registration(t, path.registration_id))
}

#[post("/api/tournaments/{id}/registrations/{registration_id}/reject")]
async fn api_reject_registration(state: AppState, path: Path<RegistrationPath>) -> HttpResponse {
    run_simple(&state, path.id, |t| reject_registration(t, path.registration_id))
}

/// Change max teams / teams per group (RegistrationOpen only).
#[put("/api/tournaments/{id}/settings")]
async fn api_configure(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SettingsBody>,
) -> HttpResponse {
    run_simple(&state, path.id, |t| {
        configure(t, body.max_teams, body.teams_per_group)
    })
}

/// Draw groups (RegistrationOpen -> GroupStage).
/// Body `{"confirmUneven": true}` accepts a smaller last group.
#[post("/api/tournaments/{id}/groups")]
async fn api_generate_groups(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateGroupsBody>>,
) -> HttpResponse {
    let confirm_uneven = body.map(|b| b.confirm_uneven).unwrap_or_default();
    run_simple(&state, path.id, |t| {
        generate_groups(t, confirm_uneven, &mut rand::thread_rng())
    })
}

/// Record the score of an unplayed group match.
#[put("/api/tournaments/{id}/groups/score")]
async fn api_record_group_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    run_simple(&state, path.id, |t| record_group_score(t, body.match_id, &body.score))
}

/// Correct the score of a group match that already has one.
#[put("/api/tournaments/{id}/groups/score/edit")]
async fn api_edit_group_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    run_simple(&state, path.id, |t| edit_group_score(t, body.match_id, &body.score))
}

/// Build the bracket from group qualifiers (GroupStage -> FinalStage).
/// Body `{"manualSeeding": true}` leaves the first round empty for manual placement.
#[post("/api/tournaments/{id}/knockout")]
async fn api_generate_knockout(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateKnockoutBody>>,
) -> HttpResponse {
    let seeding = match body.map(|b| b.manual_seeding) {
        Some(true) => Seeding::Manual,
        _ => Seeding::GroupOrder,
    };
    run_simple(&state, path.id, |t| generate_knockout_seeded(t, seeding))
}

/// Place an unassigned qualifier into an empty first-round slot.
#[put("/api/tournaments/{id}/knockout/slot")]
async fn api_assign_slot(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SlotBody>,
) -> HttpResponse {
    run_simple(&state, path.id, |t| {
        assign_knockout_slot(t, body.match_id, body.slot, body.team_id)
    })
}

/// Record a knockout score; scoring the final finishes the tournament and updates rankings.
#[put("/api/tournaments/{id}/knockout/score")]
async fn api_record_knockout_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    run_command(&state, path.id, |t, rankings| {
        record_knockout_score(t, rankings, body.match_id, &body.score)
    })
}

/// Random scores for every remaining match of the current stage (demo only).
#[post("/api/tournaments/{id}/simulate")]
async fn api_simulate(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_command(&state, path.id, |t, rankings| {
        simulate_remaining(t, rankings, &mut rand::thread_rng())
    })
}

#[get("/api/rankings/{category}")]
async fn api_get_ranking(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match find_ranking(&g.rankings, &path.category) {
        Some(entry) => HttpResponse::Ok().json(entry),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No ranking" })),
    }
}

#[get("/api/rankings/{category}/csv")]
async fn api_get_ranking_csv(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match find_ranking(&g.rankings, &path.category) {
        Some(entry) => entry,
        None => return HttpResponse::NotFound().body("No ranking"),
    };
    match ranking_to_csv(entry) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed for '{}': {}", path.category, e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Store::default()));
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_approve_registration)
            .service(api_reject_registration)
            .service(api_configure)
            .service(api_generate_groups)
            .service(api_record_group_score)
            .service(api_edit_group_score)
            .service(api_generate_knockout)
            .service(api_assign_slot)
            .service(api_record_knockout_score)
            .service(api_simulate)
            .service(api_get_ranking)
            .service(api_get_ranking_csv)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn invalid_create_request_gets_json_error() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(RwLock::new(Store::default())))
                .app_data(Data::new(ServerConfig::default()))
                .service(api_create_tournament),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(serde_json::json!({ "name": " ", "category": "Level 3" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], TournamentError::EmptyName.to_string());
    }

    #[actix_web::test]
    async fn create_uses_configured_defaults() {
        let state = Data::new(RwLock::new(Store::default()));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(Data::new(ServerConfig::default()))
                .service(api_create_tournament),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(serde_json::json!({ "name": "Open", "category": "Level 3" }))
            .to_request();
        let t: Tournament = test::call_and_read_body_json(&app, req).await;
        assert_eq!((t.max_teams, t.teams_per_group), (16, 4));
        assert!(state.read().unwrap().tournaments.contains_key(&t.id));
    }
}
