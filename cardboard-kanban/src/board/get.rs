//! GetBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::unlogged;
use crate::types::BoardId;
use crate::view::BoardView;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a board with its columns and their cards in display order
#[operation(verb = "get", noun = "board", description = "Retrieve a board with columns and cards")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetBoard {
    /// The board ID
    pub id: BoardId,
}

impl GetBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        ctx.owned_board(&self.id).await?;
        let view = BoardView::load(ctx.gateway(), &self.id).await?;
        Ok(view.to_json())
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}
