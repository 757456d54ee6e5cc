//! Ordered commit queue for one board session
//!
//! Write-sets are committed one at a time, in the order their optimistic
//! views were produced. Every job is stamped with the session epoch current
//! when it was queued. A failed commit bumps the epoch and reloads the view
//! from storage while holding the view's write lock; jobs stamped with an
//! older epoch are dropped unexecuted because the optimistic state they
//! belonged to no longer exists.
//!
//! Explicit reloads travel through the same queue, so they only read storage
//! after every earlier write-set has landed. They bump the epoch as well.

use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::reorder::WriteSet;
use crate::types::BoardId;
use crate::view::BoardView;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

/// How a queued write-set ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    /// Written through the gateway
    Applied,
    /// Dropped because the view it was made on was replaced, after a failed
    /// commit or a reload
    Discarded,
    /// The move was a no-op; nothing was queued
    Unchanged,
}

/// Shared state the worker needs. Kept separate from the session so the
/// worker does not keep the session alive.
#[derive(Clone)]
pub(crate) struct CommitTarget {
    pub board: BoardId,
    pub gateway: Arc<dyn PersistenceGateway>,
    pub view: Arc<RwLock<Arc<BoardView>>>,
    pub epoch: Arc<AtomicU64>,
}

struct CommitJob {
    seq: u64,
    epoch: u64,
    writes: WriteSet,
    reply: oneshot::Sender<Result<CommitStatus>>,
}

enum Job {
    Commit(CommitJob),
    Reload(oneshot::Sender<Result<Arc<BoardView>>>),
}

/// Handle for feeding the worker
pub(crate) struct CommitQueue {
    tx: mpsc::UnboundedSender<Job>,
    seq: AtomicU64,
}

impl CommitQueue {
    /// Spawn the worker on the current tokio runtime
    pub fn spawn(target: CommitTarget) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(target, rx));
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    /// Queue `writes` under `epoch`.
    ///
    /// Callers must hold the view's write lock so queue order matches the
    /// order in which views were replaced.
    pub fn enqueue(&self, epoch: u64, writes: WriteSet) -> Result<PendingCommit> {
        let (reply, rx) = oneshot::channel();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.tx
            .send(Job::Commit(CommitJob {
                seq,
                epoch,
                writes,
                reply,
            }))
            .map_err(|_| KanbanError::SessionClosed)?;
        Ok(PendingCommit { rx: Some(rx) })
    }

    /// Queue a reload behind every write-set queued so far
    pub fn reload(&self) -> Result<oneshot::Receiver<Result<Arc<BoardView>>>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job::Reload(reply))
            .map_err(|_| KanbanError::SessionClosed)?;
        Ok(rx)
    }
}

/// The eventual outcome of one move's commit
#[derive(Debug)]
pub struct PendingCommit {
    rx: Option<oneshot::Receiver<Result<CommitStatus>>>,
}

impl PendingCommit {
    /// A move that produced no writes
    pub fn unchanged() -> Self {
        Self { rx: None }
    }

    /// Wait for the worker to commit or discard the write-set.
    ///
    /// A failed commit resolves to `KanbanError::CommitFailed`; by then the
    /// session view already reflects storage again.
    pub async fn wait(self) -> Result<CommitStatus> {
        match self.rx {
            None => Ok(CommitStatus::Unchanged),
            Some(rx) => rx.await.map_err(|_| KanbanError::SessionClosed)?,
        }
    }
}

async fn run(target: CommitTarget, mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        // Whoever queued the job may have stopped waiting; that is fine.
        match job {
            Job::Commit(job) => {
                let status = commit(&target, &job).await;
                let _ = job.reply.send(status);
            }
            Job::Reload(reply) => {
                let _ = reply.send(rebase(&target).await);
            }
        }
    }
    debug!(board = %target.board, "commit worker stopped");
}

async fn commit(target: &CommitTarget, job: &CommitJob) -> Result<CommitStatus> {
    let current = target.epoch.load(Ordering::SeqCst);
    if job.epoch != current {
        debug!(
            board = %target.board,
            seq = job.seq,
            epoch = job.epoch,
            current,
            "discarding stale commit"
        );
        return Ok(CommitStatus::Discarded);
    }

    match target.gateway.apply_writes(&job.writes).await {
        Ok(()) => {
            info!(
                board = %target.board,
                seq = job.seq,
                card = %job.writes.placement.card,
                rows = job.writes.len(),
                "committed move"
            );
            Ok(CommitStatus::Applied)
        }
        Err(err) => {
            warn!(
                board = %target.board,
                seq = job.seq,
                error = %err,
                "commit failed, reloading board"
            );
            recover(target).await;
            Err(KanbanError::commit_failed(err))
        }
    }
}

/// Bump the epoch and replace the view with what storage holds.
///
/// Moves queued before the bump were computed on the view being replaced and
/// will be discarded. If loading fails the last view is kept.
async fn rebase(target: &CommitTarget) -> Result<Arc<BoardView>> {
    let mut view = target.view.write().await;
    let epoch = target.epoch.fetch_add(1, Ordering::SeqCst) + 1;
    let fresh = Arc::new(BoardView::load(target.gateway.as_ref(), &target.board).await?);
    *view = fresh.clone();
    debug!(board = %target.board, epoch, "view rebased on storage");
    Ok(fresh)
}

async fn recover(target: &CommitTarget) {
    match rebase(target).await {
        Ok(_) => info!(board = %target.board, "reloaded board after failed commit"),
        Err(err) => warn!(
            board = %target.board,
            error = %err,
            "reload after failed commit failed; keeping last view"
        ),
    }
}
