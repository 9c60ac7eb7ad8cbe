//! `BoardServer` — the Axum HTTP server around the action registry.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use deskboard_rpc::registry::ActionRegistry;
use deskboard_rpc::{ActionError, ActionRequest, ActionResponse, RequestContext, RpcContext};

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;

/// Header naming the requester. Every `/api/board` call must carry it.
pub const USER_HEADER: &str = "x-board-user";

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Action registry.
    pub registry: Arc<ActionRegistry>,
    /// Handler context (connection pool).
    pub ctx: RpcContext,
    /// Shutdown coordinator.
    pub shutdown: Arc<ShutdownCoordinator>,
    /// When the server started.
    pub start_time: Instant,
}

/// The board HTTP server.
pub struct BoardServer {
    config: ServerConfig,
    registry: Arc<ActionRegistry>,
    ctx: RpcContext,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl BoardServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, registry: ActionRegistry, ctx: RpcContext) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
            ctx,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            registry: self.registry.clone(),
            ctx: self.ctx.clone(),
            shutdown: self.shutdown.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/api/board", post(board_handler))
            .route("/health", get(health_handler))
            .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address and start serving.
    ///
    /// Returns the bound address and the serve task. The task exits after
    /// the shutdown coordinator is cancelled.
    pub async fn listen(
        &self,
    ) -> std::io::Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>)> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr()).await?;
        let addr = listener.local_addr()?;
        let router = self.router();
        let token = self.shutdown.token();

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await });
            if let Err(err) = serve.await {
                error!(cause = %err, "server error");
            }
        });

        Ok((addr, handle))
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

/// POST /api/board
///
/// The action runs to completion on a blocking worker: one request is one
/// database transaction, never suspended mid-flight.
async fn board_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> (StatusCode, Json<ActionResponse>) {
    let Some(owner_id) = requester(&headers) else {
        return error_response(&ActionError::validation(format!(
            "Missing required header: {USER_HEADER}"
        )));
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(&ActionError::validation(format!(
                "Invalid request body: {rejection}"
            )));
        }
    };

    let registry = state.registry.clone();
    let ctx = state.ctx.clone();
    let req = RequestContext::new(owner_id);
    let action = request.action.clone();

    let joined = tokio::task::spawn_blocking(move || {
        registry.dispatch(&action, request.data.as_ref(), &req, &ctx)
    })
    .await;

    match joined {
        Ok(Ok(outcome)) => {
            let status = if outcome.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(ActionResponse::success(outcome.data)))
        }
        Ok(Err(err)) => error_response(&err),
        Err(join_err) => {
            error!(cause = %join_err, "board action worker panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionResponse::error("Internal server error")),
            )
        }
    }
}

fn requester(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn error_response(err: &ActionError) -> (StatusCode, Json<ActionResponse>) {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ActionResponse::error(err.to_string())))
}
