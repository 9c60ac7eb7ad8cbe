//! # deskboard-server
//!
//! Axum HTTP server for the board:
//!
//! - `POST /api/board` — the single action endpoint: `{action, data}` in,
//!   `{status, data?, message?}` out, requester identified by the
//!   `x-board-user` header
//! - `GET /health` — liveness probe
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{AppState, BoardServer};
pub use shutdown::ShutdownCoordinator;
