//! DeleteBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::BoardId;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Delete a board with all of its columns and cards
#[operation(verb = "delete", noun = "board", description = "Delete a board and everything on it")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteBoard {
    /// The board ID to delete
    pub id: BoardId,
}

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        ctx.owned_board(&self.id).await?;
        ctx.gateway().delete_board(&self.id).await?;
        info!(board = %self.id, "deleted board");

        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}
