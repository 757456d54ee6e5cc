//! AddCard command

use super::fields;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::record::logged;
use crate::types::{Card, ColumnId};
use cardboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Append a card to the bottom of a column
#[operation(verb = "add", noun = "card", description = "Create a card at the end of a column")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddCard {
    /// The column to add to
    pub column: ColumnId,
    /// The card title (required)
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub due_date: Option<String>,
    /// One of red, yellow, green, blue, purple
    pub label: Option<String>,
    pub assignee: Option<String>,
}

impl AddCard {
    /// Create an AddCard command with just a column and title
    pub fn new(column: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            title: title.into(),
            description: None,
            due_date: None,
            label: None,
            assignee: None,
        }
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
        let title = fields::title(&self.title)?;
        let due_date = self.due_date.as_deref().map(fields::due_date).transpose()?.flatten();
        let label = self.label.as_deref().map(fields::label).transpose()?.flatten();

        ctx.owned_column(&self.column).await?;
        let position = ctx
            .gateway()
            .fetch_cards_for_columns(std::slice::from_ref(&self.column))
            .await?
            .len();

        let mut card = Card::new(title, self.column.clone(), position);
        card.description = self.description.as_deref().and_then(fields::text);
        card.due_date = due_date;
        card.label = label;
        card.assignee = self.assignee.as_deref().and_then(fields::assignee);

        ctx.gateway().insert_card(&card).await?;
        info!(card = %card.id, column = %card.column, position, "added card");
        Ok(serde_json::to_value(&card)?)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();
        logged(self, started, self.run(ctx).await)
    }
}
