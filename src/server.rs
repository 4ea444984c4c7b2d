//! HTTP and WebSocket surface over the live game.

use crate::broadcast::Broadcaster;
use crate::config::ServerConfig;
use crate::error::{GameError, GameErrorKind};
use crate::games::tictactoe::{Board, Mark, Seat};
use crate::session::{LiveGame, MoveOutcome};
use anyhow::Result;
use axum::body::Body;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Form, Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Form body for `POST /startgame`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// Mark chosen by player 1.
    #[serde(rename = "type")]
    pub mark: String,
}

/// Form body for `POST /move/{player_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// Row index.
    pub x: i64,
    /// Column index.
    pub y: i64,
}

/// Error returned by a route handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// Game-level failure.
    #[display("{}", _0.kind())]
    Game(GameError),
    /// Malformed request.
    #[display("{}", _0)]
    BadRequest(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Game(e) => match e.kind() {
                GameErrorKind::NoGame | GameErrorKind::GameFull => StatusCode::CONFLICT,
                GameErrorKind::InvalidMark(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Game server: one live game behind an axum router.
#[derive(Debug, Clone)]
pub struct GameServer {
    config: ServerConfig,
    game: LiveGame,
}

impl GameServer {
    /// Creates a server with a fresh live game.
    #[instrument(skip(config), fields(addr = %config.bind_addr()))]
    pub fn new(config: ServerConfig) -> Self {
        let game = LiveGame::new(Broadcaster::new(*config.viewer_queue_capacity()));
        Self::with_game(config, game)
    }

    /// Creates a server around an existing live game.
    pub fn with_game(config: ServerConfig, game: LiveGame) -> Self {
        Self { config, game }
    }

    /// The live game served.
    pub fn game(&self) -> &LiveGame {
        &self.game
    }

    /// Builds the router.
    pub fn router(&self) -> Router {
        router(self.game.clone())
    }

    /// Binds and serves until the listener fails.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "Server ready at http://{}/", addr);
        info!("Routes: /startgame, /joingame, /move/{{player_id}}, /gameboard (ws)");

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Builds the router for `game`.
pub fn router(game: LiveGame) -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route("/newgame", get(current_board))
        .route("/startgame", post(start_game))
        .route("/joingame", get(join_game))
        .route("/move/{player_id}", post(make_move))
        .route("/gameboard", get(gameboard))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(game)
}

async fn echo(body: String) -> String {
    body
}

#[instrument(skip(game))]
async fn current_board(State(game): State<LiveGame>) -> Response {
    match game.board() {
        Some(board) => Json(board).into_response(),
        None => (StatusCode::NOT_FOUND, GameErrorKind::NoGame.to_string()).into_response(),
    }
}

#[instrument(skip(game))]
async fn start_game(
    State(game): State<LiveGame>,
    Form(req): Form<StartGameRequest>,
) -> Result<Json<Board>, ApiError> {
    let mark = Mark::parse(&req.mark)?;
    Ok(Json(game.start(mark)))
}

#[instrument(skip(game))]
async fn join_game(State(game): State<LiveGame>) -> Result<Json<Board>, ApiError> {
    Ok(Json(game.join()?))
}

#[instrument(skip(game))]
async fn make_move(
    State(game): State<LiveGame>,
    Path(player_id): Path<String>,
    Form(req): Form<MakeMoveRequest>,
) -> Result<Json<MoveOutcome>, ApiError> {
    let seat = player_id
        .parse::<u8>()
        .ok()
        .and_then(Seat::from_number)
        .ok_or_else(|| {
            warn!(%player_id, "Unknown player id");
            ApiError::BadRequest(format!("unknown player {:?}: expected 1 or 2", player_id))
        })?;

    let outcome = game.submit_move(seat, req.x, req.y)?;
    info!(%seat, accepted = outcome.accepted(), code = outcome.code(), "Move processed");
    Ok(Json(outcome))
}

async fn gameboard(State(game): State<LiveGame>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| stream_board(socket, game))
}

/// Pushes every snapshot to `socket` until either side goes away.
async fn stream_board(socket: WebSocket, game: LiveGame) {
    let mut viewer = game.subscribe();
    let viewer_id = viewer.id();
    let (mut sink, mut inbound) = socket.split();

    loop {
        tokio::select! {
            snapshot = viewer.recv() => {
                let Some(snapshot) = snapshot else { break };
                if let Err(e) = sink.send(Message::Text(snapshot.to_string().into())).await {
                    debug!(viewer_id, error = %e, "Send to viewer failed");
                    break;
                }
            }
            frame = inbound.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(viewer_id, error = %e, "Viewer socket error");
                    break;
                }
            }
        }
    }

    game.unsubscribe(viewer_id);
}
