//! KanbanContext - storage access for commands
//!
//! The context carries the gateway and the acting user. It offers lookups
//! that also enforce board ownership; the commands do the actual work.

use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::session::BoardSession;
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId, UserId};
use std::sync::Arc;

/// Context passed to every command
#[derive(Clone)]
pub struct KanbanContext {
    gateway: Arc<dyn PersistenceGateway>,
    user: UserId,
}

impl KanbanContext {
    /// Create a context acting as `user`
    pub fn new(gateway: Arc<dyn PersistenceGateway>, user: impl Into<UserId>) -> Self {
        Self {
            gateway,
            user: user.into(),
        }
    }

    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.gateway.as_ref()
    }

    /// The acting user
    pub fn user(&self) -> &UserId {
        &self.user
    }

    // =========================================================================
    // Owned lookups
    // =========================================================================

    /// Fetch a board the acting user owns
    pub async fn owned_board(&self, id: &BoardId) -> Result<Board> {
        let board = self.gateway.fetch_board(id).await?;
        if !board.is_owned_by(&self.user) {
            return Err(KanbanError::AccessDenied {
                user: self.user.to_string(),
                board: id.to_string(),
            });
        }
        Ok(board)
    }

    /// Fetch a column whose board the acting user owns
    pub async fn owned_column(&self, id: &ColumnId) -> Result<Column> {
        let column = self.gateway.fetch_column(id).await?;
        self.owned_board(&column.board).await?;
        Ok(column)
    }

    /// Fetch a card together with its column, checking ownership of the board
    pub async fn owned_card(&self, id: &CardId) -> Result<(Column, Card)> {
        let card = self.gateway.fetch_card(id).await?;
        let column = self.owned_column(&card.column).await?;
        Ok((column, card))
    }

    /// Open a session on a board the acting user owns
    pub async fn open_session(&self, board: &BoardId) -> Result<BoardSession> {
        BoardSession::open(self.gateway.clone(), board.clone(), self.user.clone()).await
    }
}
