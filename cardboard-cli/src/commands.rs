//! Dispatch parsed commands to board operations and describe the results.

use std::sync::Arc;

use anyhow::{Context, Result};
use cardboard_config::CardboardConfig;
use cardboard_kanban::{
    activity::ListActivity,
    board::{CreateBoard, DeleteBoard, GetBoard, ListBoards},
    card::{AddCard, DeleteCard, MoveCard, UpdateCard},
    column::{AddColumn, DeleteColumn, RenameColumn},
    Execute, KanbanContext, KanbanError, KanbanOperationProcessor, OperationProcessor,
    SqliteGateway,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{BoardCommand, CardCommand, CardFields, ColumnCommand, Commands};
use crate::table;

/// A command result: the raw value plus its human-readable rendering
#[derive(Debug)]
pub struct Output {
    pub value: Value,
    pub text: String,
}

impl Output {
    fn new(value: Value, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }

    /// Text to print on stdout
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string_pretty(&self.value)?)
        } else {
            Ok(self.text.clone())
        }
    }
}

/// An open database acting as one user
pub struct App {
    ctx: KanbanContext,
    processor: KanbanOperationProcessor,
}

impl App {
    /// Open the configured database, creating its directory when missing
    pub fn open(config: &CardboardConfig) -> Result<Self> {
        let user = config.require_user()?;
        if let Some(parent) = config.database.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let gateway = SqliteGateway::open(&config.database).with_context(|| {
            format!("Failed to open database {}", config.database.display())
        })?;
        debug!(database = %config.database.display(), user, "opened board database");

        Ok(Self {
            ctx: KanbanContext::new(Arc::new(gateway), user),
            processor: KanbanOperationProcessor::new(),
        })
    }

    async fn process<O>(&self, operation: &O) -> Result<Value>
    where
        O: Execute<KanbanContext, KanbanError>,
    {
        Ok(self.processor.process(operation, &self.ctx).await?)
    }

    pub async fn run(&self, command: Commands) -> Result<Output> {
        match command {
            Commands::Board { action } => self.board(action).await,
            Commands::Column { action } => self.column(action).await,
            Commands::Card { action } => self.card(action).await,
            Commands::Activity { limit } => {
                let op = match limit {
                    Some(limit) => ListActivity::new().with_limit(limit),
                    None => ListActivity::new(),
                };
                let value = self.process(&op).await?;
                let text = if value["count"].as_u64() == Some(0) {
                    "No activity yet.".to_string()
                } else {
                    table::activity(&value).to_string()
                };
                Ok(Output::new(value, text))
            }
        }
    }

    async fn board(&self, action: BoardCommand) -> Result<Output> {
        match action {
            BoardCommand::Create { name } => {
                let value = self.process(&CreateBoard::new(name)).await?;
                let text = format!(
                    "Created board '{}' ({})\n{}",
                    str_of(&value, "name"),
                    str_of(&value, "id"),
                    table::board(&value)
                );
                Ok(Output::new(value, text))
            }
            BoardCommand::List => {
                let value = self.process(&ListBoards).await?;
                let text = if value["count"].as_u64() == Some(0) {
                    "No boards yet. Create one with `cardboard board create <name>`.".to_string()
                } else {
                    table::boards(&value).to_string()
                };
                Ok(Output::new(value, text))
            }
            BoardCommand::Show { id } => {
                let value = self.process(&GetBoard::new(id)).await?;
                let text = format!(
                    "{} ({})\n{}",
                    str_of(&value, "name"),
                    str_of(&value, "id"),
                    table::board(&value)
                );
                Ok(Output::new(value, text))
            }
            BoardCommand::Delete { id } => {
                let value = self.process(&DeleteBoard::new(id)).await?;
                let text = format!("Deleted board {}", str_of(&value, "id"));
                Ok(Output::new(value, text))
            }
        }
    }

    async fn column(&self, action: ColumnCommand) -> Result<Output> {
        let value = match action {
            ColumnCommand::Add { board, name } => {
                self.process(&AddColumn::new(board, name)).await?
            }
            ColumnCommand::Rename { id, name } => {
                self.process(&RenameColumn::new(id, name)).await?
            }
            ColumnCommand::Delete { id } => {
                let value = self.process(&DeleteColumn::new(id)).await?;
                let text = format!(
                    "Deleted column {} and {} card(s)",
                    str_of(&value, "id"),
                    value["cards_deleted"].as_u64().unwrap_or_default()
                );
                return Ok(Output::new(value, text));
            }
        };
        let text = format!(
            "Column '{}' ({}) at position {}",
            str_of(&value, "name"),
            str_of(&value, "id"),
            value["position"]
        );
        Ok(Output::new(value, text))
    }

    async fn card(&self, action: CardCommand) -> Result<Output> {
        match action {
            CardCommand::Add {
                column,
                title,
                fields,
            } => {
                let value = self.process(&add_card(column, title, fields)).await?;
                Ok(card_output(value))
            }
            CardCommand::Update { id, title, fields } => {
                let value = self.process(&update_card(id, title, fields)).await?;
                Ok(card_output(value))
            }
            CardCommand::Move { id, column, index } => {
                let op = match index {
                    Some(index) => MoveCard::new(id, column, index),
                    None => MoveCard::to_column(id, column),
                };
                let value = self.process(&op).await?;
                let text = format!(
                    "Moved {} to column {} at position {} ({})",
                    str_of(&value, "id"),
                    str_of(&value, "column"),
                    value["position"],
                    str_of(&value, "status")
                );
                Ok(Output::new(value, text))
            }
            CardCommand::Delete { id } => {
                let value = self.process(&DeleteCard::new(id)).await?;
                let text = format!(
                    "Deleted card '{}' ({})",
                    str_of(&value, "title"),
                    str_of(&value, "id")
                );
                Ok(Output::new(value, text))
            }
        }
    }
}

fn add_card(column: String, title: String, fields: CardFields) -> AddCard {
    let mut op = AddCard::new(column, title);
    if let Some(description) = fields.description {
        op = op.with_description(description);
    }
    if let Some(due) = fields.due {
        op = op.with_due_date(due);
    }
    if let Some(label) = fields.label {
        op = op.with_label(label);
    }
    if let Some(assignee) = fields.assignee {
        op = op.with_assignee(assignee);
    }
    op
}

fn update_card(id: String, title: Option<String>, fields: CardFields) -> UpdateCard {
    let mut op = UpdateCard::new(id);
    if let Some(title) = title {
        op = op.with_title(title);
    }
    if let Some(description) = fields.description {
        op = op.with_description(description);
    }
    if let Some(due) = fields.due {
        op = op.with_due_date(due);
    }
    if let Some(label) = fields.label {
        op = op.with_label(label);
    }
    if let Some(assignee) = fields.assignee {
        op = op.with_assignee(assignee);
    }
    op
}

fn card_output(value: Value) -> Output {
    let text = format!(
        "Card '{}' ({}) in column {} at position {}",
        str_of(&value, "title"),
        str_of(&value, "id"),
        str_of(&value, "column"),
        value["position"]
    );
    Output::new(value, text)
}

fn str_of<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or_default()
}
