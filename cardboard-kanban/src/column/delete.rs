//! DeleteColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::ColumnId;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Delete a column together with its cards
#[operation(verb = "delete", noun = "column", description = "Delete a column and all of its cards")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let column = ctx.owned_column(&self.id).await?;
        let cards = ctx
            .gateway()
            .fetch_cards_for_columns(std::slice::from_ref(&self.id))
            .await?
            .len();

        ctx.gateway().delete_column(&self.id).await?;

        // Close the gap left in the board's column order
        let mut renumbered = 0;
        for (index, mut remaining) in ctx
            .gateway()
            .fetch_columns(&column.board)
            .await?
            .into_iter()
            .enumerate()
        {
            if remaining.position != index {
                remaining.position = index;
                ctx.gateway().update_column(&remaining).await?;
                renumbered += 1;
            }
        }

        info!(
            board = %column.board,
            column = %self.id,
            cards,
            renumbered,
            "deleted column"
        );
        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
            "cards_deleted": cards,
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteGateway;
    use crate::test_support::seed_board;
    use crate::view::BoardView;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_middle_column_renumbers() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let seeded = seed_board(db.as_ref(), "alice", &[1, 3, 1]).await.unwrap();
        let ctx = KanbanContext::new(db.clone(), "alice");

        let result = DeleteColumn::new(seeded.columns[1].id.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["cards_deleted"], 3);

        let view = BoardView::load(db.as_ref(), &seeded.board.id).await.unwrap();
        let names: Vec<&str> = view.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["To Do", "Done"]);
        assert_eq!(view.cards.len(), 2);
        assert!(view.is_dense());
    }

    #[tokio::test]
    async fn test_delete_missing_column() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let ctx = KanbanContext::new(db, "alice");
        let err = DeleteColumn::new("nope")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
