//! Kanban board engine with drag-and-drop reordering and SQLite-backed storage
//!
//! Users own boards, boards hold ordered columns, columns hold ordered cards.
//! The heart of the crate is [`reorder()`]: given every card on a board and
//! the outcome of a drag, it computes the new card order and the minimal set
//! of writes needed to persist it.
//!
//! ## Overview
//!
//! - **Pure reordering** - [`reorder()`] performs no I/O and never mutates its input
//! - **Immutable views** - a [`BoardView`] is replaced wholesale on every move
//! - **Optimistic sessions** - a [`BoardSession`] shows a move at once and commits it
//!   in the background, in order; a failed commit reloads the board from storage
//! - **Storage seam** - everything goes through [`PersistenceGateway`];
//!   [`SqliteGateway`] is the shipped implementation
//! - **Audited commands** - board, column and card commands are operations whose
//!   mutations land in an activity log via [`KanbanOperationProcessor`]
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use cardboard_kanban::{
//!     board::CreateBoard, card::{AddCard, MoveCard}, Execute, KanbanContext,
//!     KanbanOperationProcessor, OperationProcessor, SqliteGateway,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Arc::new(SqliteGateway::open("board.db")?);
//! let ctx = KanbanContext::new(db, "alice");
//! let processor = KanbanOperationProcessor::new();
//!
//! let board = processor.process(&CreateBoard::new("Launch"), &ctx).await?;
//! let todo = board["columns"][0]["id"].as_str().unwrap_or_default().to_string();
//! let done = board["columns"][2]["id"].as_str().unwrap_or_default().to_string();
//!
//! let card = processor.process(&AddCard::new(todo, "Write docs"), &ctx).await?;
//! let id = card["id"].as_str().unwrap_or_default().to_string();
//! processor.process(&MoveCard::new(id, done, 0), &ctx).await?;
//! # Ok(())
//! # }
//! ```

mod commit;
mod context;
mod error;
pub mod gateway;
mod processor;
mod record;
pub mod reorder;
mod session;
pub mod sqlite;
pub mod types;
mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Command modules
pub mod activity;
pub mod board;
pub mod card;
pub mod column;

// Re-export Execute trait and types from operations crate
pub use cardboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use commit::{CommitStatus, PendingCommit};
pub use context::KanbanContext;
pub use error::{KanbanError, Result};
pub use gateway::PersistenceGateway;
pub use processor::KanbanOperationProcessor;
pub use reorder::{
    reorder, CardMove, DropLocation, Placement, PositionUpdate, Reorder, WriteSet,
};
pub use session::BoardSession;
pub use sqlite::SqliteGateway;
pub use view::BoardView;

// Re-export commonly used types
pub use types::{Board, BoardId, Card, CardId, Column, ColumnId, Label, UserId, DEFAULT_COLUMNS};
