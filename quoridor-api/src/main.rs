//! Quoridor Web API
//!
//! Serves one shared game session over REST. The session lock is the single
//! point every request goes through, so moves and fences are applied one at a
//! time against a consistent game.
//!
//! Configuration comes from the environment:
//! - `QUORIDOR_ADDR`: listen address (default `0.0.0.0:8000`)
//! - `QUORIDOR_RULES`: optional path to a JSON rules file, e.g.
//!   `{ "jumps": "strict", "require_path": true }`
//! - `RUST_LOG`: log filter (default `info`)

use std::net::SocketAddr;
use std::path::{Path as FilePath, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quoridor_core::notation::parse_record;
use quoridor_core::{Action, Coord, Game, Orientation, Player, Rules};

// =============================================================================
// Configuration
// =============================================================================

const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Error)]
enum ConfigError {
    #[error("invalid QUORIDOR_ADDR {value:?}: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("cannot read rules file {path:?}: {source}")]
    RulesIo { path: PathBuf, source: std::io::Error },
    #[error("cannot parse rules file {path:?}: {source}")]
    RulesJson { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug)]
struct Config {
    addr: SocketAddr,
    rules: Rules,
}

impl Config {
    fn from_env() -> Result<Self, ConfigError> {
        let addr_value = std::env::var("QUORIDOR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_value.parse().map_err(|source| ConfigError::Addr {
            value: addr_value.clone(),
            source,
        })?;

        let rules = match std::env::var_os("QUORIDOR_RULES") {
            Some(path) => load_rules(FilePath::new(&path))?,
            None => Rules::default(),
        };
        Ok(Config { addr, rules })
    }
}

fn load_rules(path: &FilePath) -> Result<Rules, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::RulesIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::RulesJson {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Session State
// =============================================================================

/// The game being played, with every earlier state kept for undo/redo.
struct GameSession {
    /// History of game states (index 0 = starting position)
    states: Vec<Game>,
    /// Notations (notations[i] = action that led to states[i+1])
    notations: Vec<String>,
    /// Current position in history
    current_index: usize,
    rules: Rules,
}

impl GameSession {
    fn new(rules: Rules) -> Self {
        Self {
            states: vec![Game::with_rules(rules)],
            notations: vec![],
            current_index: 0,
            rules,
        }
    }

    fn current_game(&self) -> &Game {
        &self.states[self.current_index]
    }

    fn reset(&mut self) {
        *self = GameSession::new(self.rules);
    }

    fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    fn can_redo(&self) -> bool {
        self.current_index < self.states.len() - 1
    }

    /// Play an action for the side to move. Acting after an undo drops the redo tail.
    fn play(&mut self, action: Action) -> Result<&Game, String> {
        let mut next = self.current_game().clone();
        let player = next.turn();
        next.apply(player, action).map_err(|e| e.to_string())?;

        let idx = self.current_index;
        self.states.truncate(idx + 1);
        self.notations.truncate(idx);
        self.states.push(next);
        self.notations.push(action.to_string());
        self.current_index += 1;
        Ok(self.current_game())
    }

    /// Replace the session with a replay of a notation record.
    /// On error the session is left as it was.
    fn import(&mut self, record: &str) -> Result<(), String> {
        let actions = parse_record(record).map_err(|e| e.to_string())?;
        let mut replay = GameSession::new(self.rules);
        for (i, action) in actions.into_iter().enumerate() {
            replay
                .play(action)
                .map_err(|e| format!("Move {} ({}): {}", i + 1, action, e))?;
        }
        *self = replay;
        Ok(())
    }

    fn export(&self) -> String {
        self.notations[..self.current_index].join(" ")
    }
}

/// Shared application state
struct AppStateInner {
    session: Mutex<GameSession>,
}

type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
struct CoordModel {
    x: i32,
    y: i32,
}

impl From<Coord> for CoordModel {
    fn from(c: Coord) -> Self {
        CoordModel { x: c.x, y: c.y }
    }
}

#[derive(Serialize)]
struct PlayerModel {
    player: Player,
    position: CoordModel,
    fences_left: u8,
    /// Shortest route to the goal row, ignoring pawns; null when sealed in
    distance_to_goal: Option<usize>,
}

#[derive(Serialize)]
struct GameStateModel {
    players: Vec<PlayerModel>,
    current_player: Player,
    won: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<Player>,
    vertical_fences: Vec<CoordModel>,
    horizontal_fences: Vec<CoordModel>,
    rules: Rules,
    move_index: usize,
    can_undo: bool,
    can_redo: bool,
}

#[derive(Deserialize)]
struct MoveRequest {
    player: Player,
    x: Option<i32>,
    y: Option<i32>,
}

#[derive(Deserialize)]
struct FenceRequest {
    player: Player,
    orientation: Orientation,
    x: Option<i32>,
    y: Option<i32>,
}

#[derive(Serialize)]
struct HistoryEntryModel {
    index: usize,
    notation: String,
    player: Player,
}

#[derive(Serialize)]
struct HistoryModel {
    moves: Vec<HistoryEntryModel>,
    current_index: usize,
    total_moves: usize,
}

#[derive(Serialize)]
struct ExportModel {
    notation: String,
}

#[derive(Deserialize)]
struct ImportRequest {
    notation: String,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

#[derive(Debug, Serialize)]
struct ErrorModel {
    detail: String,
}

type ApiError = (StatusCode, Json<ErrorModel>);

fn bad_request(detail: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorModel { detail: detail.into() }),
    )
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn game_to_model(game: &Game, session: &GameSession) -> GameStateModel {
    let players = Player::all()
        .map(|player| PlayerModel {
            player,
            position: game.position(player).into(),
            fences_left: game.fences_left(player),
            distance_to_goal: game.distance_to_goal(player),
        })
        .collect();

    GameStateModel {
        players,
        current_player: game.turn(),
        won: game.is_won(),
        winner: game.winner(),
        vertical_fences: game.vertical_fences().iter().copied().map(CoordModel::from).collect(),
        horizontal_fences: game.horizontal_fences().iter().copied().map(CoordModel::from).collect(),
        rules: game.rules(),
        move_index: session.current_index,
        can_undo: session.can_undo(),
        can_redo: session.can_redo(),
    }
}

fn session_model(session: &GameSession) -> Json<GameStateModel> {
    Json(game_to_model(session.current_game(), session))
}

/// A missing axis is rejected like an off-board one.
fn request_coord(x: Option<i32>, y: Option<i32>) -> Result<Coord, ApiError> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Coord::new(x, y)),
        _ => Err(bad_request("Coordinate must have both x and y")),
    }
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, GameSession>, ApiError> {
    state.session.lock().map_err(|_| {
        error!("session lock poisoned");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorModel { detail: "Session unavailable".to_string() }),
        )
    })
}

/// Check the submitting player matches the side to move, then play.
fn submit(session: &mut GameSession, player: Player, action: Action) -> Result<Json<GameStateModel>, ApiError> {
    if let Err(reason) = session.current_game().check(player, action) {
        warn!(%player, %action, %reason, "action rejected");
        return Err(bad_request(reason.to_string()));
    }
    session.play(action).map_err(bad_request)?;
    info!(%player, %action, "action played");
    Ok(session_model(session))
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Result<Json<GameStateModel>, ApiError> {
    let session = lock(&state)?;
    Ok(session_model(&session))
}

async fn get_moves(State(state): State<AppState>) -> Result<Json<Vec<CoordModel>>, ApiError> {
    let session = lock(&state)?;
    let moves = session.current_game().legal_pawn_moves();
    Ok(Json(moves.into_iter().map(CoordModel::from).collect()))
}

async fn make_move(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameStateModel>, ApiError> {
    let to = request_coord(req.x, req.y)?;
    let mut session = lock(&state)?;
    submit(&mut session, req.player, Action::Move { to })
}

async fn place_fence(
    State(state): State<AppState>,
    Json(req): Json<FenceRequest>,
) -> Result<Json<GameStateModel>, ApiError> {
    let anchor = request_coord(req.x, req.y)?;
    let mut session = lock(&state)?;
    submit(
        &mut session,
        req.player,
        Action::Fence { orientation: req.orientation, anchor },
    )
}

async fn reset_game(State(state): State<AppState>) -> Result<Json<GameStateModel>, ApiError> {
    let mut session = lock(&state)?;
    session.reset();
    info!("game reset");
    Ok(session_model(&session))
}

async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryModel>, ApiError> {
    let session = lock(&state)?;

    let moves: Vec<HistoryEntryModel> = session
        .notations
        .iter()
        .enumerate()
        .map(|(i, notation)| HistoryEntryModel {
            index: i + 1,
            notation: notation.clone(),
            player: session.states[i].turn(),
        })
        .collect();

    Ok(Json(HistoryModel {
        total_moves: session.notations.len(),
        current_index: session.current_index,
        moves,
    }))
}

async fn undo(State(state): State<AppState>) -> Result<Json<GameStateModel>, ApiError> {
    let mut session = lock(&state)?;
    if !session.can_undo() {
        return Err(bad_request("Nothing to undo"));
    }
    session.current_index -= 1;
    Ok(session_model(&session))
}

async fn redo(State(state): State<AppState>) -> Result<Json<GameStateModel>, ApiError> {
    let mut session = lock(&state)?;
    if !session.can_redo() {
        return Err(bad_request("Nothing to redo"));
    }
    session.current_index += 1;
    Ok(session_model(&session))
}

async fn goto_move(
    State(state): State<AppState>,
    Path(move_index): Path<usize>,
) -> Result<Json<GameStateModel>, ApiError> {
    let mut session = lock(&state)?;
    if move_index >= session.states.len() {
        return Err(bad_request("Invalid move index"));
    }
    session.current_index = move_index;
    Ok(session_model(&session))
}

async fn export_game(State(state): State<AppState>) -> Result<Json<ExportModel>, ApiError> {
    let session = lock(&state)?;
    Ok(Json(ExportModel { notation: session.export() }))
}

async fn import_game(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<GameStateModel>, ApiError> {
    let mut session = lock(&state)?;
    session.import(&req.notation).map_err(|e| {
        warn!(error = %e, "import rejected");
        bad_request(e)
    })?;
    info!(moves = session.notations.len(), "game imported");
    Ok(session_model(&session))
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Main
// =============================================================================

fn app(rules: Rules) -> Router {
    let state: AppState = Arc::new(AppStateInner {
        session: Mutex::new(GameSession::new(rules)),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/game", get(get_game))
        .route("/moves", get(get_moves))
        .route("/move", post(make_move))
        .route("/fence", post(place_fence))
        .route("/reset", post(reset_game))
        .route("/history", get(get_history))
        .route("/undo", post(undo))
        .route("/redo", post(redo))
        .route("/goto/{move_index}", post(goto_move))
        .route("/export", get(export_game))
        .route("/import", post(import_game))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!(rules = ?config.rules, "starting session");

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {}", e);
            std::process::exit(1);
        }
    };
    info!("Quoridor API running on http://{}", config.addr);
    if let Err(e) = axum::serve(listener, app(config.rules)).await {
        error!("server error: {}", e);
    }
}
