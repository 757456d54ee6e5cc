//! Board session: the optimistic view of one board plus its commit worker

use crate::commit::{CommitQueue, CommitTarget, PendingCommit};
use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::reorder::CardMove;
use crate::types::{BoardId, UserId};
use crate::view::BoardView;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// One user's working copy of a board.
///
/// Moves update the view immediately and commit in the background through an
/// ordered queue. Cloning is cheap; clones share the view and the queue.
/// Dropping the last clone stops the commit worker once it drains.
#[derive(Clone)]
pub struct BoardSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    board: BoardId,
    user: UserId,
    target: CommitTarget,
    commits: CommitQueue,
}

impl BoardSession {
    /// Load `board` for `user`.
    ///
    /// Fails with `AccessDenied` when `user` does not own the board. Must be
    /// called from within a tokio runtime.
    pub async fn open(
        gateway: Arc<dyn PersistenceGateway>,
        board: BoardId,
        user: UserId,
    ) -> Result<Self> {
        let view = BoardView::load(gateway.as_ref(), &board).await?;
        if !view.board.is_owned_by(&user) {
            return Err(KanbanError::AccessDenied {
                user: user.to_string(),
                board: board.to_string(),
            });
        }

        let target = CommitTarget {
            board: board.clone(),
            gateway,
            view: Arc::new(RwLock::new(Arc::new(view))),
            epoch: Arc::new(AtomicU64::new(0)),
        };
        let commits = CommitQueue::spawn(target.clone());

        debug!(board = %board, user = %user, "opened board session");
        Ok(Self {
            inner: Arc::new(SessionInner {
                board,
                user,
                target,
                commits,
            }),
        })
    }

    pub fn board_id(&self) -> &BoardId {
        &self.inner.board
    }

    pub fn user(&self) -> &UserId {
        &self.inner.user
    }

    /// Current view, optimistic moves included
    pub async fn view(&self) -> Arc<BoardView> {
        self.inner.target.view.read().await.clone()
    }

    /// Number of failed commits so far
    pub fn epoch(&self) -> u64 {
        self.inner.target.epoch.load(Ordering::SeqCst)
    }

    /// Apply a drag outcome.
    ///
    /// The view is replaced before this returns; the returned
    /// [`PendingCommit`] resolves once the write-set has been committed or
    /// discarded. Errors here (unknown card or column) leave the view as it
    /// was and queue nothing.
    pub async fn move_card(&self, mv: CardMove) -> Result<PendingCommit> {
        let mut view = self.inner.target.view.write().await;
        let (next, writes) = view.apply_move(&mv)?;

        let Some(writes) = writes else {
            debug!(board = %self.inner.board, card = %mv.card, "move left board unchanged");
            return Ok(PendingCommit::unchanged());
        };

        let epoch = self.epoch();
        let pending = self.inner.commits.enqueue(epoch, writes)?;
        *view = Arc::new(next);
        debug!(board = %self.inner.board, card = %mv.card, epoch, "applied optimistic move");
        Ok(pending)
    }

    /// Replace the view with what storage holds once every move queued so
    /// far has been committed.
    ///
    /// The reload is queued when this is called, not when the future is
    /// first polled. Moves made after that point but before the reload runs
    /// are discarded along with the view they were made on.
    pub fn reload(&self) -> impl Future<Output = Result<Arc<BoardView>>> + Send + 'static {
        let queued = self.inner.commits.reload();
        async move { queued?.await.map_err(|_| KanbanError::SessionClosed)? }
    }
}
