//! Helpers for tests: a fault-injecting gateway and board seeding.
//!
//! Compiled for this crate's own tests and for anyone enabling the
//! `test-support` feature.

use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::reorder::{Placement, PositionUpdate, WriteSet};
use crate::sqlite::SqliteGateway;
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId, UserId};
use crate::view::BoardView;
use async_trait::async_trait;
use cardboard_operations::LogEntry;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// In-memory SQLite gateway whose move commits can be made to fail or stall.
///
/// Only the move write path (`apply_writes`, `update_card_placement`,
/// `batch_update_positions`) is affected; everything else passes straight
/// through, so reloads after an injected failure see real storage.
pub struct FlakyGateway {
    inner: SqliteGateway,
    failures: AtomicUsize,
    commits: AtomicUsize,
    gate: Mutex<()>,
}

impl FlakyGateway {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: SqliteGateway::open_in_memory()?,
            failures: AtomicUsize::new(0),
            commits: AtomicUsize::new(0),
            gate: Mutex::new(()),
        })
    }

    /// Make the next `count` move writes fail
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Hold every move write until the returned guard is dropped
    pub async fn pause(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// Number of move writes that reached storage
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    async fn admit(&self) -> Result<()> {
        let _gate = self.gate.lock().await;
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(KanbanError::Storage(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
                Some("injected write failure".into()),
            )));
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for FlakyGateway {
    async fn insert_board(&self, board: &Board) -> Result<()> {
        self.inner.insert_board(board).await
    }

    async fn fetch_board(&self, id: &BoardId) -> Result<Board> {
        self.inner.fetch_board(id).await
    }

    async fn list_boards(&self, owner: &UserId) -> Result<Vec<Board>> {
        self.inner.list_boards(owner).await
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        self.inner.delete_board(id).await
    }

    async fn insert_column(&self, column: &Column) -> Result<()> {
        self.inner.insert_column(column).await
    }

    async fn fetch_column(&self, id: &ColumnId) -> Result<Column> {
        self.inner.fetch_column(id).await
    }

    async fn fetch_columns(&self, board: &BoardId) -> Result<Vec<Column>> {
        self.inner.fetch_columns(board).await
    }

    async fn update_column(&self, column: &Column) -> Result<()> {
        self.inner.update_column(column).await
    }

    async fn delete_column(&self, id: &ColumnId) -> Result<()> {
        self.inner.delete_column(id).await
    }

    async fn insert_card(&self, card: &Card) -> Result<()> {
        self.inner.insert_card(card).await
    }

    async fn fetch_card(&self, id: &CardId) -> Result<Card> {
        self.inner.fetch_card(id).await
    }

    async fn fetch_cards_for_columns(&self, columns: &[ColumnId]) -> Result<Vec<Card>> {
        self.inner.fetch_cards_for_columns(columns).await
    }

    async fn update_card(&self, card: &Card) -> Result<()> {
        self.inner.update_card(card).await
    }

    async fn update_card_placement(&self, placement: &Placement) -> Result<()> {
        self.admit().await?;
        self.inner.update_card_placement(placement).await
    }

    async fn batch_update_positions(&self, updates: &[PositionUpdate]) -> Result<()> {
        self.admit().await?;
        self.inner.batch_update_positions(updates).await
    }

    async fn delete_card(&self, id: &CardId) -> Result<()> {
        self.inner.delete_card(id).await
    }

    async fn apply_writes(&self, writes: &WriteSet) -> Result<()> {
        self.admit().await?;
        self.inner.apply_writes(writes).await
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.inner.append_activity(entry).await
    }

    async fn read_activity(
        &self,
        actor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>> {
        self.inner.read_activity(actor, limit).await
    }
}

/// Insert a board owned by `owner` with the default columns, then fill column
/// `i` with `cards[i]` cards titled `"<column>-<n>"`.
pub async fn seed_board(
    gateway: &dyn PersistenceGateway,
    owner: &str,
    cards: &[usize],
) -> Result<BoardView> {
    let board = Board::new("Seeded", UserId::from(owner));
    gateway.insert_board(&board).await?;

    let columns = board.default_columns();
    for column in &columns {
        gateway.insert_column(column).await?;
    }

    for (column, count) in columns.iter().zip(cards) {
        for n in 0..*count {
            let card = Card::new(format!("{}-{}", column.name, n), column.id.clone(), n);
            gateway.insert_card(&card).await?;
        }
    }

    BoardView::load(gateway, &board.id).await
}
