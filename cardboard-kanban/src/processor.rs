//! Operation processor that records activity

use crate::context::KanbanContext;
use crate::error::KanbanError;
use async_trait::async_trait;
use cardboard_operations::{Execute, OperationProcessor};
use serde_json::Value;
use tracing::warn;

/// Runs kanban operations and appends their log entries to the activity log.
///
/// Entries are attributed to the context's user unless an explicit actor was
/// set with [`KanbanOperationProcessor::with_actor`]. A failure to append is
/// logged and otherwise ignored; the operation's own result stands.
#[derive(Debug, Default, Clone)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value, KanbanError>
    where
        O: Execute<KanbanContext, KanbanError>,
    {
        let (result, entry) = operation.execute(ctx).await.split();

        if let Some(entry) = entry {
            let actor = self
                .actor
                .clone()
                .unwrap_or_else(|| ctx.user().to_string());
            let entry = entry.with_actor(actor);
            if let Err(err) = ctx.gateway().append_activity(&entry).await {
                warn!(op = %entry.op, error = %err, "failed to record activity");
            }
        }

        result
    }
}
