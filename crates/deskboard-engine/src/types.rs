//! Board entity types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Task status. `Normal ⇄ Priority`, and either may move to `Completed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Plain task.
    #[default]
    Normal,
    /// Flagged as priority.
    Priority,
    /// Done. Completed tasks ignore priority changes.
    Completed,
}

impl TaskStatus {
    /// SQL string form of this status.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Priority => "priority",
            Self::Completed => "completed",
        }
    }

    /// Parse the SQL string form. Unknown values fall back to `Normal`;
    /// the CHECK constraint keeps unknown values out of the table anyway.
    pub fn from_sql(s: &str) -> Self {
        match s {
            "priority" => Self::Priority,
            "completed" => Self::Completed,
            _ => Self::Normal,
        }
    }

    /// Parse a caller-supplied status string, rejecting unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "priority" => Some(Self::Priority),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Placeholder title used when a stored payload cannot be parsed.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// User-authored task content.
///
/// A partially-open schema: `title` is required, everything else rides in
/// the flattened extension map untouched. The engine never interprets the
/// payload beyond the title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task title.
    pub title: String,
    /// Additional untyped fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskPayload {
    /// A payload with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: Map::new(),
        }
    }

    /// The placeholder payload substituted for unparseable stored blobs.
    pub fn placeholder() -> Self {
        Self::titled(UNTITLED_TASK)
    }

    /// Parse a stored payload blob, substituting the placeholder on failure.
    ///
    /// Deserialization failure is a recoverable event, not an error — a
    /// single corrupt payload must not take down a whole board read.
    pub fn parse(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|_| Self::placeholder())
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"title\":{UNTITLED_TASK:?}}}"))
    }
}

/// A board column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column id (`col-` prefixed UUIDv7).
    pub id: String,
    /// Owning user.
    pub owner_id: String,
    /// Display name.
    pub name: String,
    /// Zero-based position within the owner's board.
    pub position: i64,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// ISO-8601 last-update timestamp.
    pub updated_at: String,
}

/// A task row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task id (`task-` prefixed UUIDv7).
    pub id: String,
    /// Owning user.
    pub owner_id: String,
    /// Column this task sits in.
    pub column_id: String,
    /// Zero-based position within the column.
    pub position: i64,
    /// Current status.
    pub status: TaskStatus,
    /// User-authored content.
    pub payload: TaskPayload,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// ISO-8601 last-update timestamp.
    pub updated_at: String,
}

/// A column with its tasks nested, as returned by the board query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnWithTasks {
    /// The column.
    pub column: Column,
    /// Tasks in ascending position order.
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_sql_round_trip() {
        for status in [TaskStatus::Normal, TaskStatus::Priority, TaskStatus::Completed] {
            assert_eq!(TaskStatus::from_sql(status.as_sql()), status);
        }
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert_eq!(TaskStatus::parse("priority"), Some(TaskStatus::Priority));
        assert_eq!(TaskStatus::parse("urgent"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn payload_preserves_extra_fields() {
        let payload =
            TaskPayload::parse(r#"{"title":"Buy milk","color":"red","estimate":3}"#);
        assert_eq!(payload.title, "Buy milk");
        assert_eq!(payload.extra["color"], json!("red"));
        assert_eq!(payload.extra["estimate"], json!(3));

        let round: TaskPayload = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(round, payload);
    }

    #[test]
    fn payload_parse_failure_yields_placeholder() {
        assert_eq!(TaskPayload::parse("not json"), TaskPayload::placeholder());
        // Missing required title is also a parse failure
        assert_eq!(
            TaskPayload::parse(r#"{"color":"red"}"#),
            TaskPayload::placeholder()
        );
        assert_eq!(TaskPayload::placeholder().title, UNTITLED_TASK);
    }
}
