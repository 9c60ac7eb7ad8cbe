//! Task action handlers.

use deskboard_engine::{BoardService, TaskStatus};
use serde_json::Value;

use crate::adapters::task_to_wire;
use crate::context::{RequestContext, RpcContext};
use crate::errors::ActionError;
use crate::handlers::{optional_string_param, require_bool_param, require_string_param};
use crate::registry::{ActionHandler, ActionOutcome};

// ─────────────────────────────────────────────────────────────────────────────
// createTask
// ─────────────────────────────────────────────────────────────────────────────

/// `createTask {column_id, title, status?}` — append a task to the end of a
/// column the requester owns.
pub struct CreateTaskHandler;

impl ActionHandler for CreateTaskHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let column_id = require_string_param(data, "column_id")?;
        let title = require_string_param(data, "title")?;
        let status = match optional_string_param(data, "status") {
            Some(raw) => Some(TaskStatus::parse(&raw).ok_or_else(|| {
                ActionError::validation(format!("Unknown task status: {raw}"))
            })?),
            None => None,
        };

        let mut conn = ctx.pool.get()?;
        let task = BoardService::create_task(&mut conn, &req.owner_id, &column_id, &title, status)?;
        Ok(ActionOutcome::created(task_to_wire(&task)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// moveTask
// ─────────────────────────────────────────────────────────────────────────────

/// `moveTask {task_id, to_column_id}` — move a task to the end of another
/// column, recompacting the source column.
pub struct MoveTaskHandler;

impl ActionHandler for MoveTaskHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let task_id = require_string_param(data, "task_id")?;
        let to_column_id = require_string_param(data, "to_column_id")?;

        let mut conn = ctx.pool.get()?;
        let task = BoardService::move_task(&mut conn, &req.owner_id, &task_id, &to_column_id)?;
        Ok(ActionOutcome::ok(task_to_wire(&task)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// toggleComplete / togglePriority
// ─────────────────────────────────────────────────────────────────────────────

/// `toggleComplete {task_id, completed}` — set or clear completion.
pub struct ToggleCompleteHandler;

impl ActionHandler for ToggleCompleteHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let task_id = require_string_param(data, "task_id")?;
        let completed = require_bool_param(data, "completed")?;

        let mut conn = ctx.pool.get()?;
        let task = BoardService::toggle_complete(&mut conn, &req.owner_id, &task_id, completed)?;
        Ok(ActionOutcome::ok(task_to_wire(&task)))
    }
}

/// `togglePriority {task_id, priority}` — set or clear priority. A no-op on
/// completed tasks.
pub struct TogglePriorityHandler;

impl ActionHandler for TogglePriorityHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let task_id = require_string_param(data, "task_id")?;
        let priority = require_bool_param(data, "priority")?;

        let mut conn = ctx.pool.get()?;
        let task = BoardService::toggle_priority(&mut conn, &req.owner_id, &task_id, priority)?;
        Ok(ActionOutcome::ok(task_to_wire(&task)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// deleteTask / duplicateTask
// ─────────────────────────────────────────────────────────────────────────────

/// `deleteTask {task_id}` — delete a task and recompact its column.
pub struct DeleteTaskHandler;

impl ActionHandler for DeleteTaskHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let task_id = require_string_param(data, "task_id")?;

        let mut conn = ctx.pool.get()?;
        BoardService::delete_task(&mut conn, &req.owner_id, &task_id)?;
        Ok(ActionOutcome::ok(Value::Null))
    }
}

/// `duplicateTask {task_id}` — copy a task to the end of its column with a
/// "(Copy)" title suffix and a fresh `normal` status.
pub struct DuplicateTaskHandler;

impl ActionHandler for DuplicateTaskHandler {
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let task_id = require_string_param(data, "task_id")?;

        let mut conn = ctx.pool.get()?;
        let task = BoardService::duplicate_task(&mut conn, &req.owner_id, &task_id)?;
        Ok(ActionOutcome::created(task_to_wire(&task)))
    }
}
