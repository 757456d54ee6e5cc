//! MoveCard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::reorder::{CardMove, DropLocation};
use crate::types::{CardId, ColumnId};
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Move a card to a slot in any column of its board
#[operation(verb = "move", noun = "card", description = "Move a card to a different column or position")]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveCard {
    /// The card ID to move
    pub id: CardId,
    /// Destination column
    pub column: ColumnId,
    /// Zero-based slot in the destination; the end of the column when absent
    pub index: Option<usize>,
}

impl MoveCard {
    pub fn new(id: impl Into<CardId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: Some(index),
        }
    }

    /// Move to the end of `column`
    pub fn to_column(id: impl Into<CardId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: None,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let (column, _) = ctx.owned_card(&self.id).await?;
        let session = ctx.open_session(&column.board).await?;
        let view = session.view().await;

        let source_index = view
            .cards_in(&column.id)
            .iter()
            .position(|c| c.id == self.id)
            .ok_or_else(|| KanbanError::CardNotFound {
                id: self.id.to_string(),
            })?;
        // Past-the-end indexes are clamped by the reorder engine
        let index = self
            .index
            .unwrap_or_else(|| view.cards_in(&self.column).len());

        let mv = CardMove::new(
            self.id.clone(),
            DropLocation::new(column.id.clone(), source_index),
            DropLocation::new(self.column.clone(), index),
        );
        let status = session.move_card(mv).await?.wait().await?;

        let moved = session.view().await;
        let card = moved.card(&self.id).ok_or_else(|| KanbanError::CardNotFound {
            id: self.id.to_string(),
        })?;

        Ok(serde_json::json!({
            "id": card.id,
            "column": card.column,
            "position": card.position,
            "status": status,
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}
