//! Wire-shape builders for board entities.
//!
//! The client payload shapes differ from the engine types: tasks expose
//! their payload under a `data` key, columns use `column_name`, and
//! internal fields (owner, timestamps) stay server-side.

use deskboard_engine::{Column, ColumnWithTasks, Task};
use serde_json::{Value, json};

/// `{task_id, column_id, position, status, data: {title, …}}`
pub fn task_to_wire(task: &Task) -> Value {
    json!({
        "task_id": task.id,
        "column_id": task.column_id,
        "position": task.position,
        "status": task.status,
        "data": task.payload,
    })
}

/// `{column_id, column_name, position}` — no nested tasks.
pub fn column_to_wire(column: &Column) -> Value {
    json!({
        "column_id": column.id,
        "column_name": column.name,
        "position": column.position,
    })
}

/// `{column_id, column_name, position, tasks: […]}` for the board read.
pub fn column_with_tasks_to_wire(entry: &ColumnWithTasks) -> Value {
    let mut wire = column_to_wire(&entry.column);
    wire["tasks"] = Value::Array(entry.tasks.iter().map(task_to_wire).collect());
    wire
}

/// The full board: `{columns: […]}`.
pub fn board_to_wire(board: &[ColumnWithTasks]) -> Value {
    json!({
        "columns": board.iter().map(column_with_tasks_to_wire).collect::<Vec<_>>(),
    })
}
