//! CLI definition for the Cardboard command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cardboard - kanban boards from the command line.
///
/// Boards, columns and cards live in a SQLite database. Every change is
/// recorded in an activity log attributed to the acting user.
#[derive(Parser, Debug)]
#[command(name = "cardboard")]
#[command(version)]
#[command(about = "Kanban boards from the command line")]
#[command(
    long_about = "Cardboard keeps kanban boards in a local SQLite database.\n\n\
    Configuration is read from ~/.cardboard/config.{toml,yaml,json}, then\n\
    ./.cardboard/config.{toml,yaml,json}, then the environment, then flags.\n\n\
    Environment variables:\n  \
    CARDBOARD_DATABASE    Database file\n  \
    CARDBOARD_USER        Acting user id\n  \
    CARDBOARD_LOG_FILTER  tracing filter, e.g. cardboard=info"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Act as this user
    #[arg(short, long, global = true, value_name = "USER_ID")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, show and delete boards
    Board {
        #[command(subcommand)]
        action: BoardCommand,
    },

    /// Add, rename and delete columns
    Column {
        #[command(subcommand)]
        action: ColumnCommand,
    },

    /// Add, edit, move and delete cards
    Card {
        #[command(subcommand)]
        action: CardCommand,
    },

    /// Show your recent activity, newest first
    Activity {
        /// Maximum number of entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Create a board with To Do, In Progress and Done columns
    Create {
        /// Board name
        name: String,
    },
    /// List your boards, newest first
    List,
    /// Show a board with its columns and cards
    Show {
        /// Board id
        id: String,
    },
    /// Delete a board and everything on it
    Delete {
        /// Board id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommand {
    /// Append a column to a board
    Add {
        /// Board id
        board: String,
        /// Column name
        name: String,
    },
    /// Rename a column
    Rename {
        /// Column id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a column and all of its cards
    Delete {
        /// Column id
        id: String,
    },
}

/// Optional card fields shared by `card add` and `card update`
#[derive(Args, Debug, Default)]
pub struct CardFields {
    /// Longer description (empty string clears)
    #[arg(long)]
    pub description: Option<String>,
    /// Due date, YYYY-MM-DD (empty string clears)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,
    /// Label colour: red, yellow, green, blue, purple or none
    #[arg(long)]
    pub label: Option<String>,
    /// Assignee user id (empty string clears)
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// Add a card to the end of a column
    Add {
        /// Column id
        column: String,
        /// Card title
        title: String,
        #[command(flatten)]
        fields: CardFields,
    },
    /// Edit a card
    Update {
        /// Card id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: CardFields,
    },
    /// Move a card to another column or position
    Move {
        /// Card id
        id: String,
        /// Destination column id
        column: String,
        /// Zero-based position in the destination (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Delete a card
    Delete {
        /// Card id
        id: String,
    },
}
