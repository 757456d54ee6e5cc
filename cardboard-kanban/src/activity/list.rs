//! ListActivity command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::unlogged;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The acting user's recorded operations, newest first
#[operation(verb = "list", noun = "activity", description = "Show recent board activity")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListActivity {
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let entries = ctx
            .gateway()
            .read_activity(Some(ctx.user().as_str()), self.limit)
            .await?;

        Ok(serde_json::json!({
            "entries": entries,
            "count": entries.len(),
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListActivity {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}
