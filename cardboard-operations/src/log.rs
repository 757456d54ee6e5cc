//! Activity log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One recorded operation. Failed operations carry `{"error": ..}` as output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// ULID, so ids sort by creation time
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// "verb noun", e.g. "move card"
    pub op: String,
    /// The operation's own fields
    pub input: Value,
    pub output: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub duration_ms: u64,
}

impl LogEntry {
    fn record(op: impl Into<String>, input: Value, output: Value, elapsed: Duration) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor: None,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Entry for an operation that returned `output`
    pub fn succeeded(
        op: impl Into<String>,
        input: Value,
        output: Value,
        elapsed: Duration,
    ) -> Self {
        Self::record(op, input, output, elapsed)
    }

    /// Entry for an operation that failed with `error`
    pub fn failed(
        op: impl Into<String>,
        input: Value,
        error: &dyn std::fmt::Display,
        elapsed: Duration,
    ) -> Self {
        let output = serde_json::json!({ "error": error.to_string() });
        Self::record(op, input, output, elapsed)
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The error message of a failed operation
    pub fn error(&self) -> Option<&str> {
        self.output.get("error").and_then(Value::as_str)
    }

    pub fn is_failure(&self) -> bool {
        self.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_entry_carries_error() {
        let entry = LogEntry::failed(
            "move card",
            json!({"id": "c1"}),
            &"card not found: c1",
            Duration::from_millis(4),
        );
        assert!(entry.is_failure());
        assert_eq!(entry.error(), Some("card not found: c1"));
        assert_eq!(entry.duration_ms, 4);
        assert_eq!(entry.actor, None);
    }

    #[test]
    fn test_actor_is_omitted_from_json_until_set() {
        let entry = LogEntry::succeeded("add card", json!({}), json!({"id": "c1"}), Duration::ZERO);
        assert!(!entry.is_failure());
        assert!(serde_json::to_value(&entry).unwrap().get("actor").is_none());

        let entry = entry.with_actor("alice");
        assert_eq!(serde_json::to_value(&entry).unwrap()["actor"], "alice");
    }

    #[test]
    fn test_ids_sort_by_creation() {
        let first = LogEntry::succeeded("add card", json!({}), json!({}), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        let second = LogEntry::succeeded("add card", json!({}), json!({}), Duration::ZERO);
        assert!(first.id < second.id);
    }
}
