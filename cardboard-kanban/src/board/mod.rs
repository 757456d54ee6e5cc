//! Board commands

mod create;
mod delete;
mod get;
mod list;

pub use create::CreateBoard;
pub use delete::DeleteBoard;
pub use get::GetBoard;
pub use list::ListBoards;
