//! DeleteCard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::reorder::compact;
use crate::types::CardId;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Delete a card and close the gap it leaves in its column
#[operation(verb = "delete", noun = "card", description = "Delete a card")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteCard {
    /// The card ID to delete
    pub id: CardId,
}

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let (column, card) = ctx.owned_card(&self.id).await?;
        ctx.gateway().delete_card(&self.id).await?;

        let siblings = ctx
            .gateway()
            .fetch_cards_for_columns(std::slice::from_ref(&column.id))
            .await?;
        let updates = compact(&siblings, &column.id);
        if !updates.is_empty() {
            ctx.gateway().batch_update_positions(&updates).await?;
        }

        info!(
            card = %self.id,
            column = %column.id,
            shifted = updates.len(),
            "deleted card"
        );
        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
            "title": card.title,
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteCard {
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
    async fn test_delete_card_renumbers_siblings() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let seeded = seed_board(db.as_ref(), "alice", &[4]).await.unwrap();
        let ctx = KanbanContext::new(db.clone(), "alice");
        let todo = seeded.columns[0].id.clone();
        let second = seeded.cards_in(&todo)[1].id.clone();

        let result = DeleteCard::new(second.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "To Do-1");

        let view = BoardView::load(db.as_ref(), &seeded.board.id).await.unwrap();
        let titles: Vec<(&str, usize)> = view
            .cards_in(&todo)
            .iter()
            .map(|c| (c.title.as_str(), c.position))
            .collect();
        assert_eq!(titles, vec![("To Do-0", 0), ("To Do-2", 1), ("To Do-3", 2)]);
        assert!(view.card(&second).is_none());
    }

    #[tokio::test]
    async fn test_delete_last_card_needs_no_renumbering() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let seeded = seed_board(db.as_ref(), "alice", &[2]).await.unwrap();
        let ctx = KanbanContext::new(db.clone(), "alice");
        let last = seeded.cards_in(&seeded.columns[0].id)[1].id.clone();

        DeleteCard::new(last).execute(&ctx).await.into_result().unwrap();

        let view = BoardView::load(db.as_ref(), &seeded.board.id).await.unwrap();
        assert_eq!(view.cards.len(), 1);
        assert!(view.is_dense());
    }

    #[tokio::test]
    async fn test_delete_missing_card() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let ctx = KanbanContext::new(db, "alice");
        let err = DeleteCard::new("ghost")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::CardNotFound { .. }));
    }
}
