//! ListBoards command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::unlogged;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List the acting user's boards, newest first
#[operation(verb = "list", noun = "boards", description = "List boards owned by the current user")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListBoards;

impl ListBoards {
    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let boards = ctx.gateway().list_boards(ctx.user()).await?;
        Ok(serde_json::json!({
            "boards": boards,
            "count": boards.len(),
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListBoards {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}
