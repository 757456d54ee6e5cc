//! Board-level types: Board, Column

use super::ids::{BoardId, ColumnId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Names of the columns every new board starts with, left to right.
pub const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// The root of a workspace. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board with the given name and owner
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            name: name.into(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` owns this board
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// The default columns for this board, positions 0..N-1
    pub fn default_columns(&self) -> Vec<Column> {
        DEFAULT_COLUMNS
            .iter()
            .enumerate()
            .map(|(position, name)| Column::new(*name, self.id.clone(), position))
            .collect()
    }
}

/// A named, ordered lane within a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub board: BoardId,
    /// Zero-based, dense within the board
    pub position: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Create a new column at `position`
    pub fn new(name: impl Into<String>, board: BoardId, position: usize) -> Self {
        let now = Utc::now();
        Self {
            id: ColumnId::new(),
            name: name.into(),
            board,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}
