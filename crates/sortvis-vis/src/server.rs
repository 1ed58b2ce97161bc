//! Axum web server with WebSocket streaming for the viewer page.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sortvis_trace::{Frame, PSEUDOCODE};
use tokio::sync::{broadcast, oneshot};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::events::{Command, ViewEvent};
use crate::log::LogEntry;
use crate::playback::PlaybackStatus;
use crate::renderer::ChannelRenderer;
use crate::session::{RunOutcome, Visualizer};

/// Capacity of the per-viewer event buffer.
const EVENT_BUFFER: usize = 1024;

/// Shared application state.
pub struct AppState {
    vis: Arc<Visualizer<ChannelRenderer>>,
    events: broadcast::Sender<ViewEvent>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server with a fresh visualizer.
    pub fn new(config: VisConfig) -> Result<Self> {
        let renderer = ChannelRenderer::new(EVENT_BUFFER);
        let events = renderer.sender();
        let vis = Arc::new(Visualizer::new(config, renderer)?);
        Ok(Self {
            state: Arc::new(AppState { vis, events }),
        })
    }

    pub fn visualizer(&self) -> Arc<Visualizer<ChannelRenderer>> {
        Arc::clone(&self.state.vis)
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/status", get(status_handler))
            .route("/api/array", get(array_handler))
            .route("/api/log", get(log_handler))
            .route("/api/pseudocode", get(pseudocode_handler))
            .route("/api/run", post(run_handler))
            .route("/api/reset", post(reset_handler))
            .route("/api/log/clear", post(clear_log_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured port.
    pub async fn serve(self) -> Result<()> {
        let port = self.state.vis.config().port;
        tokio::spawn(forward_playback(Arc::clone(&self.state)));

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Relay playback status changes to viewers.
async fn forward_playback(state: Arc<AppState>) {
    let mut rx = state.vis.subscribe();
    while rx.changed().await.is_ok() {
        let status = rx.borrow_and_update().clone();
        let _ = state.events.send(ViewEvent::Playback { status });
    }
}

fn status_code(err: &Error) -> StatusCode {
    match err {
        Error::PlaybackActive => StatusCode::CONFLICT,
        Error::Trace(_) | Error::Config(_) => StatusCode::BAD_REQUEST,
        Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serve the viewer page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    message: String,
    array: Vec<f64>,
    playback: PlaybackStatus,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: state.vis.status_text(),
        array: state.vis.array(),
        playback: state.vis.playback(),
    })
}

async fn array_handler(State(state): State<Arc<AppState>>) -> Json<Frame> {
    Json(state.vis.idle_frame())
}

async fn log_handler(State(state): State<Arc<AppState>>) -> Json<Vec<LogEntry>> {
    Json(state.vis.log())
}

#[derive(Serialize)]
struct PseudocodeResponse {
    lines: &'static [&'static str],
}

async fn pseudocode_handler() -> Json<PseudocodeResponse> {
    Json(PseudocodeResponse { lines: &PSEUDOCODE })
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<(StatusCode, Json<PlaybackStatus>), StatusCode> {
    match spawn_run(&state).await {
        Ok(true) => Ok((StatusCode::ACCEPTED, Json(state.vis.playback()))),
        Ok(false) => Err(StatusCode::CONFLICT),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<Frame>, StatusCode> {
    state.vis.reset().map_err(|e| status_code(&e))?;
    Ok(Json(state.vis.idle_frame()))
}

async fn clear_log_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.vis.clear_log();
    StatusCode::NO_CONTENT
}

/// Start a run in the background; playback outlives the request.
///
/// The receiver resolves once the run has either claimed playback (`true`)
/// or found another run active (`false`).
fn spawn_run(state: &Arc<AppState>) -> oneshot::Receiver<bool> {
    let vis = Arc::clone(&state.vis);
    let (claimed_tx, claimed_rx) = oneshot::channel();
    tokio::spawn(async move {
        let report = move |claimed: bool| {
            let _ = claimed_tx.send(claimed);
        };
        match vis.run_reporting(report).await {
            Ok(RunOutcome::Completed(summary)) => {
                info!("Run complete: {} steps", summary.steps)
            }
            Ok(RunOutcome::Busy) => debug!("Run skipped, playback already active"),
            Err(e) => error!("Run failed: {}", e),
        }
    });
    claimed_rx
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!("Viewer connected");
    let mut events = state.events.subscribe();

    let initial = [
        ViewEvent::Frame {
            frame: state.vis.current_frame(),
        },
        ViewEvent::Status {
            text: state.vis.status_text(),
        },
        ViewEvent::Controls {
            enabled: !state.vis.is_playing(),
        },
    ];
    for event in initial {
        if send_event(&mut socket, &event).await.is_err() {
            return;
        }
    }
    for entry in state.vis.log() {
        if send_event(&mut socket, &ViewEvent::Log { entry }).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<Command>(&text) {
                            Ok(cmd) => handle_command(&state, cmd),
                            Err(e) => warn!("Ignoring malformed command: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Viewer disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut socket, &event).await {
                            warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Viewer lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

fn handle_command(state: &Arc<AppState>, cmd: Command) {
    debug!("Command from viewer: {:?}", cmd);
    match cmd {
        Command::Run => drop(spawn_run(state)),
        Command::Reset => {
            if let Err(e) = state.vis.reset() {
                warn!("Reset refused: {}", e);
            }
        }
        Command::ClearLog => state.vis.clear_log(),
    }
}

async fn send_event(socket: &mut WebSocket, event: &ViewEvent) -> std::result::Result<(), axum::Error> {
    let json = serde_json::to_string(event).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}
