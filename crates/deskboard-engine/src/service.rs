//! Business logic layer for board operations.
//!
//! Wraps the repository with ownership validation and the transaction
//! coordinator. Every mutating operation runs in a single `BEGIN IMMEDIATE`
//! transaction: the writer lock is taken up front, conflicting mutators
//! serialize (the second observing the first's committed result), and any
//! failure rolls the whole unit back. Commit happens only after all
//! dependent recompaction writes succeed.
//!
//! Key rules:
//! - **Appends** land at `max(position) + 1` in their scope.
//! - **Removals and cross-column moves** recompact the vacated scope so
//!   positions stay contiguous (`0..n-1`).
//! - **Explicit reorder** trusts the caller's list; no recompaction follows.
//! - **Completed tasks** ignore priority changes; completing a task
//!   discards a prior priority flag and un-completing restores `normal`.

use rusqlite::{Connection, TransactionBehavior};
use tracing::debug;

use crate::errors::{EngineError, Result};
use crate::repository::BoardRepository;
use crate::types::{Column, ColumnWithTasks, Task, TaskPayload, TaskStatus};

/// Board service with ownership validation and per-operation transactions.
pub struct BoardService;

impl BoardService {
    // ─────────────────────────────────────────────────────────────────────
    // Board query
    // ─────────────────────────────────────────────────────────────────────

    /// Assemble the full board for an owner: columns ascending by position,
    /// tasks nested under their column ascending by position.
    ///
    /// Tasks whose `column_id` matches no loaded column are dropped rather
    /// than failing the read; a corrupt task payload surfaces as the
    /// placeholder title (handled at the row level).
    pub fn get_board(conn: &Connection, owner_id: &str) -> Result<Vec<ColumnWithTasks>> {
        let columns = BoardRepository::list_columns(conn, owner_id)?;
        let tasks = BoardRepository::list_tasks(conn, owner_id)?;

        let mut board: Vec<ColumnWithTasks> = columns
            .into_iter()
            .map(|column| ColumnWithTasks {
                column,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            match board.iter_mut().find(|c| c.column.id == task.column_id) {
                Some(entry) => entry.tasks.push(task),
                None => {
                    debug!(task_id = %task.id, column_id = %task.column_id, "dropping orphan task");
                }
            }
        }

        Ok(board)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Task operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a task at the end of a column.
    pub fn create_task(
        conn: &mut Connection,
        owner_id: &str,
        column_id: &str,
        title: &str,
        status: Option<TaskStatus>,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(EngineError::Validation("Task title is required".into()));
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let column = column_owned_or_forbidden(&tx, owner_id, column_id)?;
        let position = BoardRepository::next_task_position(&tx, owner_id, &column.id)?;
        let task = BoardRepository::insert_task(
            &tx,
            owner_id,
            &column.id,
            position,
            status.unwrap_or_default(),
            &TaskPayload::titled(title),
        )?;
        tx.commit()?;
        Ok(task)
    }

    /// Move a task to another column.
    ///
    /// Same-column moves are an idempotent no-op. Cross-column moves append
    /// at the destination's end, then recompact the vacated source column.
    pub fn move_task(
        conn: &mut Connection,
        owner_id: &str,
        task_id: &str,
        to_column_id: &str,
    ) -> Result<Task> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let task = lock_task(&tx, owner_id, task_id)?;

        if task.column_id == to_column_id {
            tx.commit()?;
            return Ok(task);
        }

        let dest = column_owned_or_forbidden(&tx, owner_id, to_column_id)?;
        let position = BoardRepository::next_task_position(&tx, owner_id, &dest.id)?;
        BoardRepository::update_task_column(&tx, &task.id, &dest.id, position)?;
        BoardRepository::recompact_tasks(&tx, owner_id, &task.column_id)?;

        let moved = BoardRepository::get_task(&tx, &task.id)?
            .ok_or_else(|| EngineError::task_not_found(&task.id))?;
        tx.commit()?;
        Ok(moved)
    }

    /// Set or clear the completed flag.
    ///
    /// Completing discards a prior `priority` flag; un-completing restores
    /// `normal`, never `priority`.
    pub fn toggle_complete(
        conn: &mut Connection,
        owner_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<Task> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let task = lock_task(&tx, owner_id, task_id)?;
        let status = if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Normal
        };
        BoardRepository::update_task_status(&tx, &task.id, status)?;
        let updated = BoardRepository::get_task(&tx, &task.id)?
            .ok_or_else(|| EngineError::task_not_found(&task.id))?;
        tx.commit()?;
        Ok(updated)
    }

    /// Set or clear the priority flag. No-op on completed tasks.
    pub fn toggle_priority(
        conn: &mut Connection,
        owner_id: &str,
        task_id: &str,
        priority: bool,
    ) -> Result<Task> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let task = lock_task(&tx, owner_id, task_id)?;

        if task.status == TaskStatus::Completed {
            tx.commit()?;
            return Ok(task);
        }

        let status = if priority {
            TaskStatus::Priority
        } else {
            TaskStatus::Normal
        };
        BoardRepository::update_task_status(&tx, &task.id, status)?;
        let updated = BoardRepository::get_task(&tx, &task.id)?
            .ok_or_else(|| EngineError::task_not_found(&task.id))?;
        tx.commit()?;
        Ok(updated)
    }

    /// Delete a task and recompact its column.
    pub fn delete_task(conn: &mut Connection, owner_id: &str, task_id: &str) -> Result<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let task = lock_task(&tx, owner_id, task_id)?;
        let _ = BoardRepository::delete_task_row(&tx, &task.id)?;
        BoardRepository::recompact_tasks(&tx, owner_id, &task.column_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Duplicate a task into the same column.
    ///
    /// The copy gets `title + " (Copy)"` (placeholder-derived when the
    /// source payload failed to parse), status reset to `normal`, and the
    /// column's next append position. The source row is untouched.
    pub fn duplicate_task(conn: &mut Connection, owner_id: &str, task_id: &str) -> Result<Task> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let source = lock_task(&tx, owner_id, task_id)?;

        let mut payload = source.payload.clone();
        payload.title = format!("{} (Copy)", payload.title);

        let position = BoardRepository::next_task_position(&tx, owner_id, &source.column_id)?;
        let copy = BoardRepository::insert_task(
            &tx,
            owner_id,
            &source.column_id,
            position,
            TaskStatus::Normal,
            &payload,
        )?;
        tx.commit()?;
        Ok(copy)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Column operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a column at the end of the owner's board.
    pub fn create_column(conn: &mut Connection, owner_id: &str, name: &str) -> Result<Column> {
        if name.trim().is_empty() {
            return Err(EngineError::Validation("Column name is required".into()));
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let position = BoardRepository::next_column_position(&tx, owner_id)?;
        let column = BoardRepository::insert_column(&tx, owner_id, name, position)?;
        tx.commit()?;
        Ok(column)
    }

    /// Delete a column, cascading to its tasks, then recompact the board.
    pub fn delete_column(conn: &mut Connection, owner_id: &str, column_id: &str) -> Result<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let column = match BoardRepository::get_column(&tx, column_id)? {
            Some(c) if c.owner_id == owner_id => c,
            _ => return Err(EngineError::column_not_found(column_id)),
        };
        let _ = BoardRepository::delete_tasks_in_column(&tx, owner_id, &column.id)?;
        let _ = BoardRepository::delete_column_row(&tx, &column.id)?;
        BoardRepository::recompact_columns(&tx, owner_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Apply a caller-supplied task ordering to a column.
    ///
    /// Ids outside the column's scope are silently skipped; omitted tasks
    /// keep their previous positions. No recompaction follows — a
    /// well-formed caller supplies the complete, deduplicated member set.
    /// Returns the column's tasks after the reorder.
    pub fn reorder_column(
        conn: &mut Connection,
        owner_id: &str,
        column_id: &str,
        ordered_ids: &[String],
    ) -> Result<Vec<Task>> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let column = column_owned_or_forbidden(&tx, owner_id, column_id)?;
        BoardRepository::apply_task_order(&tx, owner_id, &column.id, ordered_ids)?;
        let tasks = BoardRepository::list_tasks_in_column(&tx, owner_id, &column.id)?;
        tx.commit()?;
        Ok(tasks)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ownership checks
// ─────────────────────────────────────────────────────────────────────────────

/// Read-and-verify the target task inside the current transaction.
///
/// A task that is absent — or hidden behind another owner — reports as
/// `NotFound`; the caller learns nothing about other owners' rows.
fn lock_task(conn: &Connection, owner_id: &str, task_id: &str) -> Result<Task> {
    match BoardRepository::get_task(conn, task_id)? {
        Some(task) if task.owner_id == owner_id => Ok(task),
        _ => Err(EngineError::task_not_found(task_id)),
    }
}

/// Resolve a column the requester must own, `Forbidden` otherwise.
fn column_owned_or_forbidden(conn: &Connection, owner_id: &str, column_id: &str) -> Result<Column> {
    match BoardRepository::get_column(conn, column_id)? {
        Some(column) if column.owner_id == owner_id => Ok(column),
        _ => Err(EngineError::Forbidden(format!(
            "column not available to requester: {column_id}"
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
