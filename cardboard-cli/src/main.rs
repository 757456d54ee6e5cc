//! Cardboard CLI - kanban boards from the command line.
//!
//! Commands:
//! - `cardboard board create <name>`: Create a board with the default columns
//! - `cardboard board list`: List your boards
//! - `cardboard board show <id>`: Show a board with its cards
//! - `cardboard board delete <id>`: Delete a board
//! - `cardboard column add <board> <name>`: Append a column
//! - `cardboard column rename <id> <name>`: Rename a column
//! - `cardboard column delete <id>`: Delete a column and its cards
//! - `cardboard card add <column> <title>`: Add a card
//! - `cardboard card update <id>`: Edit a card
//! - `cardboard card move <id> <column> [--index N]`: Move a card
//! - `cardboard card delete <id>`: Delete a card
//! - `cardboard activity [-n N]`: Show your recent activity
//!
//! Environment variables:
//! - CARDBOARD_DATABASE: Database file
//! - CARDBOARD_USER: Acting user id
//! - CARDBOARD_LOG_FILTER: Tracing filter used when RUST_LOG is unset
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardboard::{App, Cli};
use cardboard_config::{CardboardConfig, ConfigOverrides, ConfigProvider};

fn init_tracing(debug: bool, config: Option<&CardboardConfig>) {
    let filter = if debug {
        EnvFilter::new("cardboard=debug,cardboard_kanban=debug,cardboard_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.map_or("warn", |config| config.log_filter.as_str()))
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: CardboardConfig) -> anyhow::Result<()> {
    let app = App::open(&config)?;
    let output = app.run(cli.command).await?;
    println!("{}", output.render(cli.json)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        database: cli.db.clone(),
        user: cli.user.clone(),
        log_filter: None,
    };
    let config = match ConfigProvider::new().load(&overrides) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.debug, None);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(cli.debug, Some(&config));

    let exit_code = match run(cli, config).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
