//! # Cardboard Operations
//!
//! Every board command is a plain struct whose fields are its parameters.
//! `#[operation]` gives it a verb and noun; [`Execute`] runs it against a
//! context and returns an [`ExecutionResult`] saying whether the outcome
//! belongs in the activity log. An [`OperationProcessor`] stores the
//! [`LogEntry`] and hands the caller a plain `Result`.
//!
//! ```ignore
//! use cardboard_operations::*;
//!
//! #[operation(verb = "rename", noun = "column", description = "Rename a column")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct RenameColumn {
//!     pub id: ColumnId,
//!     pub name: String,
//! }
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for RenameColumn {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

// Lets the `#[operation]` expansion resolve inside this crate's own tests.
extern crate self as cardboard_operations;

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

pub use cardboard_operations_macros::operation;

pub use async_trait::async_trait;
pub use serde_json::Value;
