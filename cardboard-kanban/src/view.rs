//! Assembled, immutable snapshot of one board

use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::reorder::{self, CardMove, WriteSet};
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// A board with its columns and cards as of one point in time.
///
/// Views are never edited in place. [`BoardView::apply_move`] hands back a
/// fresh view and leaves `self` as it was, which is what lets a session swap
/// the whole thing atomically and throw it away on a failed commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub board: Board,
    /// Ordered by position
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
}

impl BoardView {
    pub fn new(board: Board, mut columns: Vec<Column>, cards: Vec<Card>) -> Self {
        columns.sort_by_key(|c| c.position);
        Self {
            board,
            columns,
            cards,
        }
    }

    /// Fetch the board, its columns and the cards of those columns.
    pub async fn load(gateway: &dyn PersistenceGateway, id: &BoardId) -> Result<Self> {
        let board = gateway.fetch_board(id).await?;
        let columns = gateway.fetch_columns(id).await?;
        let ids: Vec<ColumnId> = columns.iter().map(|c| c.id.clone()).collect();
        let cards = gateway.fetch_cards_for_columns(&ids).await?;

        debug!(
            board = %id,
            columns = columns.len(),
            cards = cards.len(),
            "loaded board view"
        );
        Ok(Self::new(board, columns, cards))
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Cards of `column` in display order
    pub fn cards_in(&self, column: &ColumnId) -> Vec<&Card> {
        reorder::column_cards(&self.cards, column)
    }

    /// Apply a drag outcome, returning the next view and what to commit.
    ///
    /// No-op moves return a clone of `self` and no write-set. Dropping onto a
    /// column that is not on this board fails with `ColumnNotFound`.
    pub fn apply_move(&self, mv: &CardMove) -> Result<(BoardView, Option<WriteSet>)> {
        if let Some(destination) = mv.destination.as_ref() {
            if !mv.is_noop() && self.column(&destination.column).is_none() {
                return Err(KanbanError::ColumnNotFound {
                    id: destination.column.to_string(),
                });
            }
        }

        let outcome = reorder::reorder(&self.cards, mv)?;
        let next = Self {
            board: self.board.clone(),
            columns: self.columns.clone(),
            cards: outcome.cards,
        };
        Ok((next, outcome.writes))
    }

    /// Whether column positions and every column's card positions run 0..N-1
    pub fn is_dense(&self) -> bool {
        let columns_dense = self
            .columns
            .iter()
            .enumerate()
            .all(|(index, column)| column.position == index);

        columns_dense
            && self.columns.iter().all(|column| {
                self.cards_in(&column.id)
                    .iter()
                    .enumerate()
                    .all(|(index, card)| card.position == index)
            })
    }

    /// Nested JSON rendering: board fields plus columns carrying their cards
    pub fn to_json(&self) -> Value {
        let columns: Vec<Value> = self
            .columns
            .iter()
            .map(|column| {
                json!({
                    "id": column.id,
                    "name": column.name,
                    "position": column.position,
                    "cards": self.cards_in(&column.id),
                })
            })
            .collect();

        json!({
            "id": self.board.id,
            "name": self.board.name,
            "owner": self.board.owner,
            "created_at": self.board.created_at,
            "columns": columns,
        })
    }
}
