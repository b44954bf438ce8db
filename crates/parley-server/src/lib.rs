//! Parley Server
//!
//! HTTP API for running interviews. Sessions live in memory, keyed by id;
//! each one is behind its own lock so turns for a session run one at a
//! time while different sessions proceed concurrently. Listing reads a
//! summary kept beside that lock, so a stuck turn never blocks it.
//! This is a library crate: the server is started via `start_server()`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::Method, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use parley_core::ai::SharedCompletionClient;
use parley_core::config::ParleyConfig;
use parley_core::session::{SessionSnapshot, SessionSummary};
use parley_core::storage::CredentialStore;
use parley_core::{InterviewMode, InterviewResult, InterviewSession};

pub mod error;
pub mod routes;
pub mod types;

use error::AppError;

/// Live sessions by id
pub type SessionStore = Arc<RwLock<HashMap<String, Arc<SessionHandle>>>>;

/// A live session plus its listing summary.
///
/// The session mutex is held for a whole turn, LLM calls included. The
/// summary is refreshed when a turn ends and can be read at any time.
pub struct SessionHandle {
    session: Mutex<InterviewSession>,
    summary: parking_lot::RwLock<SessionSummary>,
}

impl SessionHandle {
    pub fn new(session: InterviewSession) -> Self {
        let summary = session.summary();
        Self {
            session: Mutex::new(session),
            summary: parking_lot::RwLock::new(summary),
        }
    }

    /// Summary as of the last finished turn
    pub fn summary(&self) -> SessionSummary {
        self.summary.read().clone()
    }

    /// Waits for any turn in progress
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Run one turn; concurrent callers queue on the session lock
    pub async fn chat(&self, message: &str) -> InterviewResult<String> {
        let mut session = self.session.lock().await;
        let result = session.chat(message).await;
        *self.summary.write() = session.summary();
        result
    }
}

/// Configuration for starting the server.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Port, provider, model and default interview mode
    pub settings: ParleyConfig,
}

impl ServerConfig {
    pub fn port(&self) -> u16 {
        self.settings.port
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Completion client (None when no credentials configured).
    pub ai_client: Option<SharedCompletionClient>,
    pub sessions: SessionStore,
    /// Mode used when a create request doesn't name one
    pub default_mode: InterviewMode,
}

impl AppState {
    pub fn new(ai_client: Option<SharedCompletionClient>, default_mode: InterviewMode) -> Self {
        Self {
            ai_client,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            default_mode,
        }
    }

    /// The completion client, or 503 when none is configured
    pub fn client(&self) -> Result<SharedCompletionClient, AppError> {
        self.ai_client.clone().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "No language model credentials configured".to_string(),
            )
        })
    }

    pub async fn session(&self, id: &str) -> Result<Arc<SessionHandle>, AppError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Interview {} not found", id)))
    }
}

/// Build the application state from config and stored credentials.
pub fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let credentials = CredentialStore::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load credentials: {:#}", e);
        CredentialStore::default()
    });
    let ai_client = config
        .settings
        .build_ai_client(&credentials)?
        .map(|client| Arc::new(client) as SharedCompletionClient);

    Ok(AppState::new(ai_client, config.settings.default_mode))
}

/// Build the Axum router over `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Parley server and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port()).parse()?;
    let state = build_state(&config)?;
    if state.ai_client.is_none() {
        tracing::warn!("Starting without a language model; interview routes will return 503");
    }
    let app = build_router(state);

    tracing::info!("Parley server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: HashMap::from([
            ("interviews".to_string(), state.ai_client.is_some()),
            ("plans".to_string(), state.ai_client.is_some()),
        ]),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    features: HashMap<String, bool>,
}
