//! Persistence gateway - the storage seam
//!
//! The engine never talks to a database directly. Everything it needs from
//! storage goes through [`PersistenceGateway`]: plain query/insert/update/
//! delete over boards, columns and cards, plus the two writes a drag produces
//! and an activity log. Implementations report missing rows with the typed
//! not-found errors (`BoardNotFound`, `ColumnNotFound`, `CardNotFound`).

use crate::error::Result;
use crate::reorder::{Placement, PositionUpdate, WriteSet};
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId, UserId};
use async_trait::async_trait;
use cardboard_operations::LogEntry;

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    // =========================================================================
    // Boards
    // =========================================================================

    async fn insert_board(&self, board: &Board) -> Result<()>;

    async fn fetch_board(&self, id: &BoardId) -> Result<Board>;

    /// Boards owned by `owner`, newest first
    async fn list_boards(&self, owner: &UserId) -> Result<Vec<Board>>;

    /// Delete a board together with its columns and cards
    async fn delete_board(&self, id: &BoardId) -> Result<()>;

    // =========================================================================
    // Columns
    // =========================================================================

    async fn insert_column(&self, column: &Column) -> Result<()>;

    async fn fetch_column(&self, id: &ColumnId) -> Result<Column>;

    /// Columns of `board` ordered by position
    async fn fetch_columns(&self, board: &BoardId) -> Result<Vec<Column>>;

    /// Overwrite name and position of an existing column
    async fn update_column(&self, column: &Column) -> Result<()>;

    /// Delete a column; its cards go first
    async fn delete_column(&self, id: &ColumnId) -> Result<()>;

    // =========================================================================
    // Cards
    // =========================================================================

    async fn insert_card(&self, card: &Card) -> Result<()>;

    async fn fetch_card(&self, id: &CardId) -> Result<Card>;

    /// Cards of the given columns ordered by position
    async fn fetch_cards_for_columns(&self, columns: &[ColumnId]) -> Result<Vec<Card>>;

    /// Overwrite every editable field of an existing card
    async fn update_card(&self, card: &Card) -> Result<()>;

    /// Commit a moved card's new column and position
    async fn update_card_placement(&self, placement: &Placement) -> Result<()>;

    /// Commit renumbered sibling positions
    async fn batch_update_positions(&self, updates: &[PositionUpdate]) -> Result<()>;

    async fn delete_card(&self, id: &CardId) -> Result<()>;

    /// Commit everything a move produced.
    ///
    /// The default issues the placement and the sibling batch as two separate
    /// calls, so a failure between them leaves storage half-written until the
    /// next reload. Gateways with transactions should override this.
    async fn apply_writes(&self, writes: &WriteSet) -> Result<()> {
        self.update_card_placement(&writes.placement).await?;
        if !writes.positions.is_empty() {
            self.batch_update_positions(&writes.positions).await?;
        }
        Ok(())
    }

    // =========================================================================
    // Activity
    // =========================================================================

    async fn append_activity(&self, entry: &LogEntry) -> Result<()>;

    /// Activity entries, newest first. `actor` keeps only that actor's
    /// entries; `limit` caps how many come back.
    async fn read_activity(
        &self,
        actor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>>;
}
