//! Operation processor trait

use crate::Execute;
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations and takes care of whatever bookkeeping wraps them
/// (activity logging, actor attribution).
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation`, record its log entry if it has one, and return
    /// the plain result.
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E>;
}
