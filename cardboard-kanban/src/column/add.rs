//! AddColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::{BoardId, Column};
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Append a column to the right end of a board
#[operation(verb = "add", noun = "column", description = "Append a new column to a board")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The board to add to
    pub board: BoardId,
    /// Display name
    pub name: String,
}

impl AddColumn {
    pub fn new(board: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(KanbanError::invalid_value("name", "column name cannot be empty"));
        }

        ctx.owned_board(&self.board).await?;
        let position = ctx.gateway().fetch_columns(&self.board).await?.len();

        let column = Column::new(name, self.board.clone(), position);
        ctx.gateway().insert_column(&column).await?;

        info!(board = %self.board, column = %column.id, position, "added column");
        Ok(serde_json::to_value(&column)?)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}
