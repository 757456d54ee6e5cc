//! Parsing of user-supplied card fields. An empty string means "none".

use crate::error::{KanbanError, Result};
use crate::types::{Label, UserId};
use chrono::NaiveDate;

pub(super) fn title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(KanbanError::invalid_value("title", "card title cannot be empty"));
    }
    Ok(title.to_string())
}

pub(super) fn text(raw: &str) -> Option<String> {
    let text = raw.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `YYYY-MM-DD`
pub(super) fn due_date(raw: &str) -> Result<Option<NaiveDate>> {
    match text(raw) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| KanbanError::invalid_value("due_date", format!("'{}': {}", raw, e))),
    }
}

/// A palette colour, or `none`
pub(super) fn label(raw: &str) -> Result<Option<Label>> {
    match text(raw) {
        None => Ok(None),
        Some(raw) if raw.eq_ignore_ascii_case("none") => Ok(None),
        Some(raw) => raw.parse().map(Some),
    }
}

pub(super) fn assignee(raw: &str) -> Option<UserId> {
    text(raw).map(UserId::from_string)
}
