//! What an operation hands back to its processor

use crate::LogEntry;

/// Outcome of [`Execute::execute`](crate::Execute::execute).
///
/// Mutations come back `Logged` so the processor can persist the entry;
/// reads come back `Unlogged`. A failure may still carry an entry when the
/// attempt itself is worth auditing.
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// The entry to record, if any
    pub fn log_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Logged { log_entry, .. } => Some(log_entry),
            Self::Failed { log_entry, .. } => log_entry.as_ref(),
            Self::Unlogged { .. } => None,
        }
    }

    pub fn should_log(&self) -> bool {
        self.log_entry().is_some()
    }

    /// Drop the log entry and keep the outcome
    pub fn into_result(self) -> Result<T, E> {
        self.split().0
    }

    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }
}
