//! # Cardboard Configuration
//!
//! Layered configuration for the `cardboard` command line, built on Figment.
//!
//! ```rust,no_run
//! use cardboard_config::{ConfigOverrides, ConfigProvider};
//!
//! let config = ConfigProvider::new().load(&ConfigOverrides::default())?;
//! println!("database: {}", config.database.display());
//! # Ok::<(), cardboard_config::ConfigError>(())
//! ```
//!
//! See [`ConfigProvider`] for the precedence order of the sources.

mod discovery;
mod error;
mod provider;
mod types;

pub use discovery::{ConfigFile, ConfigFormat, FileDiscovery, CONFIG_DIR};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{CardboardConfig, ConfigOverrides, DEFAULT_DATABASE, DEFAULT_LOG_FILTER};
