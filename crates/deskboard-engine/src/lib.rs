//! # deskboard-engine
//!
//! The board core: columns and tasks with contiguous per-scope positions,
//! kept consistent across concurrent create/move/reorder/delete operations
//! against `SQLite`.
//!
//! Layering:
//! - [`connection`] — pooled connections with WAL and foreign keys
//! - [`migrations`] — versioned, idempotent schema migrations
//! - [`repository`] — stateless SQL access plus the positioning primitives
//!   (append, recompaction, explicit reorder)
//! - [`service`] — the board operations, each one a single immediate
//!   transaction

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod service;
pub mod types;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::EngineError;
pub use migrations::run_migrations;
pub use repository::BoardRepository;
pub use service::BoardService;
pub use types::{Column, ColumnWithTasks, Task, TaskPayload, TaskStatus};
