//! RenameColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::ColumnId;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a column
#[operation(verb = "rename", noun = "column", description = "Change a column's display name")]
#[derive(Debug, Deserialize, Serialize)]
pub struct RenameColumn {
    /// The column ID
    pub id: ColumnId,
    /// New display name
    pub name: String,
}

impl RenameColumn {
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(KanbanError::invalid_value("name", "column name cannot be empty"));
        }

        let mut column = ctx.owned_column(&self.id).await?;
        column.name = name.to_string();
        ctx.gateway().update_column(&column).await?;

        Ok(serde_json::to_value(ctx.gateway().fetch_column(&self.id).await?)?)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteGateway;
    use crate::test_support::seed_board;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rename_column() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let seeded = seed_board(db.as_ref(), "alice", &[]).await.unwrap();
        let ctx = KanbanContext::new(db, "alice");
        let id = seeded.columns[1].id.clone();

        let result = RenameColumn::new(id, "  Doing ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["name"], "Doing");
        assert_eq!(result["position"], 1);
    }

    #[tokio::test]
    async fn test_rename_missing_column() {
        let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
        let ctx = KanbanContext::new(db, "alice");
        let err = RenameColumn::new("nope", "Whatever")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::ColumnNotFound { .. }));
    }
}
