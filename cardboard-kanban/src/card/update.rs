//! UpdateCard command

use super::fields;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::CardId;
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Edit a card's details.
///
/// Fields left as `None` keep their value. For the optional fields an empty
/// string clears the value. Column and position change only through
/// [`MoveCard`](super::MoveCard).
#[operation(verb = "update", noun = "card", description = "Edit a card's title and details")]
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCard {
    /// The card ID
    pub id: CardId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, or empty to clear
    pub due_date: Option<String>,
    /// Palette colour, or empty / `none` to clear
    pub label: Option<String>,
    pub assignee: Option<String>,
}

impl UpdateCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let (_, mut card) = ctx.owned_card(&self.id).await?;

        if let Some(title) = &self.title {
            card.title = fields::title(title)?;
        }
        if let Some(description) = &self.description {
            card.description = fields::text(description);
        }
        if let Some(due_date) = &self.due_date {
            card.due_date = fields::due_date(due_date)?;
        }
        if let Some(label) = &self.label {
            card.label = fields::label(label)?;
        }
        if let Some(assignee) = &self.assignee {
            card.assignee = fields::assignee(assignee);
        }

        ctx.gateway().update_card(&card).await?;
        Ok(serde_json::to_value(ctx.gateway().fetch_card(&self.id).await?)?)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}
