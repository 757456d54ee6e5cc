//! Turning command results into `ExecutionResult`s

use crate::error::{KanbanError, Result};
use cardboard_operations::{ExecutionResult, LogEntry, Operation};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Wrap the result of a mutating command, logging success and failure alike.
pub(crate) fn logged<O>(op: &O, started: Instant, result: Result<Value>) -> ExecutionResult<Value, KanbanError>
where
    O: Operation + Serialize,
{
    let input = serde_json::to_value(op).unwrap_or(Value::Null);
    let elapsed = started.elapsed();

    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::succeeded(op.op_string(), input, value.clone(), elapsed),
            value,
        },
        Err(error) => ExecutionResult::Failed {
            log_entry: Some(LogEntry::failed(op.op_string(), input, &error, elapsed)),
            error,
        },
    }
}

/// Wrap the result of a read-only command.
pub(crate) fn unlogged(result: Result<Value>) -> ExecutionResult<Value, KanbanError> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}
