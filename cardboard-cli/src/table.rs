//! Terminal-aware table rendering for command results.
//!
//! Every renderer takes the JSON value a command returned, so the table and
//! `--json` outputs always describe the same data.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::Value;

const TITLE_WIDTH: usize = 40;

/// Create a table pre-configured for terminal-width-aware output.
///
/// Falls back to 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Boards owned by the user, one per row
pub fn boards(result: &Value) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Created"]);
    for board in items(result, "boards") {
        table.add_row(vec![
            text(board, "id"),
            text(board, "name"),
            text(board, "created_at"),
        ]);
    }
    table
}

/// A board laid out as columns side by side, cards stacked in order
pub fn board(view: &Value) -> Table {
    let columns = items(view, "columns");
    let mut table = new_table();
    table.set_header(columns.iter().map(|column| {
        Cell::new(format!("{}\n{}", text(column, "name"), text(column, "id")))
    }));

    let depth = columns
        .iter()
        .map(|column| items(column, "cards").len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        table.add_row(columns.iter().map(|column| {
            items(column, "cards")
                .get(row)
                .map(card_cell)
                .unwrap_or_default()
        }));
    }
    table
}

fn card_cell(card: &Value) -> String {
    let mut lines = vec![truncate_str(text(card, "title"), TITLE_WIDTH)];
    let mut tags = Vec::new();
    if let Some(label) = card.get("label").and_then(Value::as_str) {
        tags.push(format!("[{}]", label));
    }
    if let Some(due) = card.get("due_date").and_then(Value::as_str) {
        tags.push(format!("due {}", due));
    }
    if let Some(assignee) = card.get("assignee").and_then(Value::as_str) {
        tags.push(format!("@{}", assignee));
    }
    if !tags.is_empty() {
        lines.push(tags.join(" "));
    }
    lines.push(text(card, "id").to_string());
    lines.join("\n")
}

/// Activity entries, newest first as returned
pub fn activity(result: &Value) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Time", "Operation", "Result", "ms"]);
    for entry in items(result, "entries") {
        let outcome = if entry.get("output").and_then(|o| o.get("error")).is_some() {
            "error"
        } else {
            "ok"
        };
        table.add_row(vec![
            text(entry, "timestamp").to_string(),
            text(entry, "op").to_string(),
            outcome.to_string(),
            entry
                .get("duration_ms")
                .and_then(Value::as_u64)
                .unwrap_or_default()
                .to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("こんにちは世界テスト", 6), "こんに...");
    }

    #[test]
    fn test_board_rows_follow_deepest_column() {
        let view = json!({
            "columns": [
                {"id": "c1", "name": "To Do", "cards": [
                    {"id": "k1", "title": "First"},
                    {"id": "k2", "title": "Second", "label": "red", "due_date": "2026-05-01"},
                ]},
                {"id": "c2", "name": "Done", "cards": []},
            ]
        });
        let rendered = board(&view).to_string();
        assert!(rendered.contains("To Do"));
        assert!(rendered.contains("Done"));
        assert!(rendered.contains("Second"));
        assert!(rendered.contains("[red] due 2026-05-01"));
        assert_eq!(board(&view).row_iter().count(), 2);
    }

    #[test]
    fn test_card_cell_without_tags() {
        let cell = card_cell(&json!({"id": "k1", "title": "Plain"}));
        assert_eq!(cell, "Plain\nk1");
    }

    #[test]
    fn test_activity_marks_failures() {
        let result = json!({"entries": [
            {"timestamp": "t2", "op": "move card", "output": {"error": "nope"}, "duration_ms": 3},
            {"timestamp": "t1", "op": "add card", "output": {"id": "k1"}, "duration_ms": 1},
        ]});
        let rendered = activity(&result).to_string();
        assert!(rendered.contains("error"));
        assert!(rendered.contains("add card"));
        assert_eq!(activity(&result).row_iter().count(), 2);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        assert_eq!(boards(&json!({})).row_iter().count(), 0);
        assert_eq!(board(&json!({"columns": []})).row_iter().count(), 0);
    }
}
