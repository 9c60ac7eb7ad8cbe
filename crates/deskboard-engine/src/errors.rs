//! Engine error type.

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors produced by the board engine.
///
/// The first three variants carry the caller-facing taxonomy (validation,
/// ownership, missing target); the rest are store failures that roll back
/// the enclosing transaction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or missing input (empty title, bad status value).
    #[error("{0}")]
    Validation(String),

    /// The entity exists but belongs to a different owner.
    #[error("{0}")]
    Forbidden(String),

    /// The entity is absent (or absent from the requester's view).
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("task" or "column").
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// Underlying `SQLite` error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl EngineError {
    /// A `NotFound` for a task id.
    pub fn task_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "task",
            id: id.to_string(),
        }
    }

    /// A `NotFound` for a column id.
    pub fn column_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "column",
            id: id.to_string(),
        }
    }
}
