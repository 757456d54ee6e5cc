//! CreateBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::Board;
use crate::view::BoardView;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create a board owned by the acting user, seeded with the default columns
#[operation(
    verb = "create",
    noun = "board",
    description = "Create a board with To Do, In Progress and Done columns"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBoard {
    /// The board name
    pub name: String,
}

impl CreateBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(KanbanError::invalid_value("name", "board name cannot be empty"));
        }

        let board = Board::new(name, ctx.user().clone());
        ctx.gateway().insert_board(&board).await?;

        let columns = board.default_columns();
        for column in &columns {
            ctx.gateway().insert_column(column).await?;
        }

        info!(board = %board.id, owner = %board.owner, "created board");
        Ok(BoardView::new(board, columns, Vec::new()).to_json())
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for CreateBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteGateway;
    use crate::types::{BoardId, DEFAULT_COLUMNS};
    use std::sync::Arc;

    fn context() -> KanbanContext {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        KanbanContext::new(db, "alice")
    }

    #[tokio::test]
    async fn test_create_board_seeds_columns() {
        let ctx = context();
        let result = CreateBoard::new("Launch")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Launch");
        assert_eq!(result["owner"], "alice");

        let id = BoardId::from(result["id"].as_str().unwrap());
        let columns = ctx.gateway().fetch_columns(&id).await.unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_COLUMNS.to_vec());
        assert!(columns.iter().enumerate().all(|(i, c)| c.position == i));
    }

    #[tokio::test]
    async fn test_create_board_is_logged() {
        let ctx = context();
        let result = CreateBoard::new("Launch").execute(&ctx).await;
        assert!(result.should_log());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let ctx = context();
        let err = CreateBoard::new("   ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::InvalidValue { .. }));
    }
}
