//! Action error codes and error type.

use deskboard_engine::EngineError;
use tracing::error;

// ── Error code constants ────────────────────────────────────────────

/// Malformed or missing identifiers, or empty required fields.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
/// Entity exists but is not owned by the requester.
pub const FORBIDDEN: &str = "FORBIDDEN";
/// Entity absent or lock target missing.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Store failure or unexpected condition; transaction rolled back.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Generic message echoed to clients for internal failures. The detailed
/// cause goes to the diagnostic log only.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error returned by action handlers.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Required field missing, wrong type, or empty.
    #[error("{message}")]
    Validation {
        /// Description of what is wrong.
        message: String,
    },

    /// Requester does not own the entity.
    #[error("{message}")]
    Forbidden {
        /// Human-readable message.
        message: String,
    },

    /// Requested entity not found.
    #[error("{message}")]
    NotFound {
        /// Human-readable message.
        message: String,
    },

    /// Internal error; cause is logged, not echoed.
    #[error("{INTERNAL_MESSAGE}")]
    Internal,
}

impl ActionError {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Machine-readable error code for this variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => VALIDATION_ERROR,
            Self::Forbidden { .. } => FORBIDDEN,
            Self::NotFound { .. } => NOT_FOUND,
            Self::Internal => INTERNAL_ERROR,
        }
    }

    /// HTTP status code this error maps to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Internal => 500,
        }
    }
}

impl From<EngineError> for ActionError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(message) => Self::Validation { message },
            EngineError::Forbidden(message) => Self::Forbidden { message },
            EngineError::NotFound { .. } => Self::NotFound {
                message: err.to_string(),
            },
            EngineError::Sqlite(_) | EngineError::Pool(_) => {
                error!(cause = %err, "board operation failed");
                Self::Internal
            }
        }
    }
}

impl From<r2d2::Error> for ActionError {
    fn from(err: r2d2::Error) -> Self {
        error!(cause = %err, "failed to acquire database connection");
        Self::Internal
    }
}
