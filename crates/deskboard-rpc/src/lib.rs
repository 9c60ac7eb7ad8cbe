//! # deskboard-rpc
//!
//! The `{action, data}` protocol layer, action registry, and handlers.
//!
//! Implements the full board action surface:
//! - Board: getAll
//! - Task: createTask, moveTask, toggleComplete, togglePriority,
//!   deleteTask, duplicateTask
//! - Column: createColumn, deleteColumn, reorderColumn
//!
//! Handlers are synchronous: each board action is one short `SQLite`
//! transaction run to completion, so the server dispatches the whole
//! request on a blocking worker instead of suspending mid-transaction.

#![deny(unsafe_code)]

pub mod adapters;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod registry;
pub mod types;

pub use context::{RequestContext, RpcContext};
pub use errors::ActionError;
pub use handlers::register_all;
pub use registry::{ActionOutcome, ActionRegistry};
pub use types::{ActionRequest, ActionResponse};
