//! Cardboard CLI - kanban boards from the command line.
//!
//! The binary in `main.rs` parses arguments, loads configuration and hands the
//! command to [`App`]; everything here is reusable from tests.

pub mod cli;
pub mod commands;
pub mod table;

pub use cli::{BoardCommand, CardCommand, CardFields, Cli, ColumnCommand, Commands};
pub use commands::{App, Output};
