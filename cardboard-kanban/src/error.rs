//! Errors raised by the board engine and its storage

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Card not found
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// The acting user does not own the board
    #[error("user '{user}' may not access board {board}")]
    AccessDenied { user: String, board: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A queued write-set could not be committed; the session view has been
    /// reloaded from storage
    #[error("commit failed: {message}")]
    CommitFailed { message: String },

    /// The session's commit worker is gone
    #[error("board session closed")]
    SessionClosed,

    /// Storage error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a commit failure from any displayable cause
    pub fn commit_failed(cause: impl std::fmt::Display) -> Self {
        Self::CommitFailed {
            message: cause.to_string(),
        }
    }

    /// Check if this is a not-found error of any kind
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound { .. } | Self::ColumnNotFound { .. } | Self::CardNotFound { .. }
        )
    }
}
