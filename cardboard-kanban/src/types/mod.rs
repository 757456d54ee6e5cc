//! Core types for the kanban engine

mod board;
mod card;
mod ids;

// Re-export all types
pub use board::{Board, Column, DEFAULT_COLUMNS};
pub use card::{Card, Label};
pub use ids::{BoardId, CardId, ColumnId, UserId};
