//! SQL data access layer for columns and tasks.
//!
//! All methods take a `&Connection` parameter and are stateless — pure
//! functions that translate between Rust types and SQL. Uses
//! `uuid::Uuid::now_v7()` for time-ordered ID generation with
//! entity-specific prefixes.
//!
//! The positioning primitives live here:
//! - `next_*_position` — append at `max(position) + 1` (empty scope → 0)
//! - `recompact_*` — rewrite a scope's positions to `0..n-1`, preserving
//!   relative order
//! - `apply_task_order` — explicit reorder; position := index of each id in
//!   the caller's list, ids outside the scope silently skipped

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::errors::Result;
use crate::types::{Column, Task, TaskPayload, TaskStatus};

/// Generate a prefixed UUID v7 ID.
fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

/// Get current UTC timestamp as ISO 8601 string.
fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Board repository for SQL CRUD and positioning operations.
pub struct BoardRepository;

impl BoardRepository {
    // ─────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────

    /// Insert a column at the given position.
    pub fn insert_column(
        conn: &Connection,
        owner_id: &str,
        name: &str,
        position: i64,
    ) -> Result<Column> {
        let id = generate_id("col");
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO columns (id, owner_id, name, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, owner_id, name, position, now],
        )?;
        Ok(Column {
            id,
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            position,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a column by ID, regardless of owner.
    pub fn get_column(conn: &Connection, id: &str) -> Result<Option<Column>> {
        let column = conn
            .query_row("SELECT * FROM columns WHERE id = ?1", params![id], |row| {
                Ok(column_from_row(row))
            })
            .optional()?;
        Ok(column)
    }

    /// List an owner's columns in ascending position order.
    pub fn list_columns(conn: &Connection, owner_id: &str) -> Result<Vec<Column>> {
        let mut stmt = conn
            .prepare("SELECT * FROM columns WHERE owner_id = ?1 ORDER BY position ASC")?;
        let columns = stmt
            .query_map(params![owner_id], |row| Ok(column_from_row(row)))?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(columns)
    }

    /// Delete a column row. Returns true if a row was deleted.
    pub fn delete_column_row(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM columns WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Next append position in the owner's column scope.
    pub fn next_column_position(conn: &Connection, owner_id: &str) -> Result<i64> {
        let next: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM columns WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(next)
    }

    /// Rewrite the owner's column positions to `0..n-1`, preserving order.
    pub fn recompact_columns(conn: &Connection, owner_id: &str) -> Result<()> {
        let ids: Vec<String> = {
            let mut stmt = conn.prepare(
                "SELECT id FROM columns WHERE owner_id = ?1 ORDER BY position ASC",
            )?;
            stmt.query_map(params![owner_id], |row| row.get(0))?
                .filter_map(std::result::Result::ok)
                .collect()
        };
        for (index, id) in ids.iter().enumerate() {
            let _ = conn.execute(
                "UPDATE columns SET position = ?1 WHERE id = ?2",
                params![index as i64, id],
            )?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tasks
    // ─────────────────────────────────────────────────────────────────────

    /// Insert a task at the given position.
    pub fn insert_task(
        conn: &Connection,
        owner_id: &str,
        column_id: &str,
        position: i64,
        status: TaskStatus,
        payload: &TaskPayload,
    ) -> Result<Task> {
        let id = generate_id("task");
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO tasks (id, owner_id, column_id, position, status, payload, \
             created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![id, owner_id, column_id, position, status.as_sql(), payload.to_json(), now],
        )?;
        Ok(Task {
            id,
            owner_id: owner_id.to_string(),
            column_id: column_id.to_string(),
            position,
            status,
            payload: payload.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a task by ID, regardless of owner.
    pub fn get_task(conn: &Connection, id: &str) -> Result<Option<Task>> {
        let task = conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], |row| {
                Ok(task_from_row(row))
            })
            .optional()?;
        Ok(task)
    }

    /// List every task of an owner in ascending position order.
    pub fn list_tasks(conn: &Connection, owner_id: &str) -> Result<Vec<Task>> {
        let mut stmt =
            conn.prepare("SELECT * FROM tasks WHERE owner_id = ?1 ORDER BY position ASC")?;
        let tasks = stmt
            .query_map(params![owner_id], |row| Ok(task_from_row(row)))?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(tasks)
    }

    /// List the tasks in one column scope in ascending position order.
    pub fn list_tasks_in_column(
        conn: &Connection,
        owner_id: &str,
        column_id: &str,
    ) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM tasks WHERE owner_id = ?1 AND column_id = ?2 ORDER BY position ASC",
        )?;
        let tasks = stmt
            .query_map(params![owner_id, column_id], |row| Ok(task_from_row(row)))?
            .filter_map(std::result::Result::ok)
            .collect();
        Ok(tasks)
    }

    /// Delete a task row. Returns true if a row was deleted.
    pub fn delete_task_row(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Hard-delete every task in a column scope. Returns the delete count.
    pub fn delete_tasks_in_column(
        conn: &Connection,
        owner_id: &str,
        column_id: &str,
    ) -> Result<usize> {
        let changed = conn.execute(
            "DELETE FROM tasks WHERE owner_id = ?1 AND column_id = ?2",
            params![owner_id, column_id],
        )?;
        Ok(changed)
    }

    /// Next append position in a column's task scope.
    pub fn next_task_position(
        conn: &Connection,
        owner_id: &str,
        column_id: &str,
    ) -> Result<i64> {
        let next: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks \
             WHERE owner_id = ?1 AND column_id = ?2",
            params![owner_id, column_id],
            |row| row.get(0),
        )?;
        Ok(next)
    }

    /// Rewrite a column scope's task positions to `0..n-1`, preserving order.
    pub fn recompact_tasks(conn: &Connection, owner_id: &str, column_id: &str) -> Result<()> {
        let ids: Vec<String> = {
            let mut stmt = conn.prepare(
                "SELECT id FROM tasks WHERE owner_id = ?1 AND column_id = ?2 \
                 ORDER BY position ASC",
            )?;
            stmt.query_map(params![owner_id, column_id], |row| row.get(0))?
                .filter_map(std::result::Result::ok)
                .collect()
        };
        for (index, id) in ids.iter().enumerate() {
            let _ = conn.execute(
                "UPDATE tasks SET position = ?1 WHERE id = ?2",
                params![index as i64, id],
            )?;
        }
        Ok(())
    }

    /// Explicit reorder: position := index for each id in the caller's list.
    ///
    /// The WHERE clause scopes each update to the owner and column, so ids
    /// from another owner or column match zero rows and are silently
    /// skipped. Tasks present in the scope but omitted from the list keep
    /// whatever position they last held.
    pub fn apply_task_order(
        conn: &Connection,
        owner_id: &str,
        column_id: &str,
        ordered_ids: &[String],
    ) -> Result<()> {
        for (index, id) in ordered_ids.iter().enumerate() {
            let _ = conn.execute(
                "UPDATE tasks SET position = ?1 \
                 WHERE id = ?2 AND owner_id = ?3 AND column_id = ?4",
                params![index as i64, id, owner_id, column_id],
            )?;
        }
        Ok(())
    }

    /// Set a task's status.
    pub fn update_task_status(conn: &Connection, id: &str, status: TaskStatus) -> Result<()> {
        let _ = conn.execute(
            "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_sql(), now_iso(), id],
        )?;
        Ok(())
    }

    /// Reparent a task into another column at the given position.
    pub fn update_task_column(
        conn: &Connection,
        id: &str,
        column_id: &str,
        position: i64,
    ) -> Result<()> {
        let _ = conn.execute(
            "UPDATE tasks SET column_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
            params![column_id, position, now_iso(), id],
        )?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row converters
// ─────────────────────────────────────────────────────────────────────────────

fn column_from_row(row: &rusqlite::Row<'_>) -> Column {
    Column {
        id: row.get_unwrap("id"),
        owner_id: row.get_unwrap("owner_id"),
        name: row.get_unwrap("name"),
        position: row.get_unwrap("position"),
        created_at: row.get_unwrap("created_at"),
        updated_at: row.get_unwrap("updated_at"),
    }
}

fn task_from_row(row: &rusqlite::Row<'_>) -> Task {
    let status_str: String = row.get_unwrap("status");
    let payload_json: String = row.get_unwrap("payload");

    Task {
        id: row.get_unwrap("id"),
        owner_id: row.get_unwrap("owner_id"),
        column_id: row.get_unwrap("column_id"),
        position: row.get_unwrap("position"),
        status: TaskStatus::from_sql(&status_str),
        payload: TaskPayload::parse(&payload_json),
        created_at: row.get_unwrap("created_at"),
        updated_at: row.get_unwrap("updated_at"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
