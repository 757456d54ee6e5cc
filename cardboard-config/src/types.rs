//! Configuration values

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default tracing filter when nothing else is configured
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default database filename inside the global configuration directory
pub const DEFAULT_DATABASE: &str = "board.db";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardboardConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Acting user id; commands that touch boards require one
    #[serde(default)]
    pub user: Option<String>,
    /// `tracing` filter directive, e.g. `cardboard=debug`
    pub log_filter: String,
}

impl CardboardConfig {
    /// Reject values no command could work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("database", "path cannot be empty"));
        }
        if let Some(user) = &self.user {
            if user.trim().is_empty() {
                return Err(ConfigError::invalid_value("user", "user id cannot be blank"));
            }
        }
        Ok(())
    }

    /// The acting user, or an error naming how to set one
    pub fn require_user(&self) -> ConfigResult<&str> {
        self.user.as_deref().map(str::trim).ok_or_else(|| {
            ConfigError::invalid_value(
                "user",
                "no user configured; pass --user or set CARDBOARD_USER",
            )
        })
    }
}

/// Highest-precedence values, typically from command-line flags.
/// Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(user: Option<&str>) -> CardboardConfig {
        CardboardConfig {
            database: PathBuf::from("board.db"),
            user: user.map(String::from),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(config(Some("alice")).validate().is_ok());
        assert!(config(None).validate().is_ok());
        assert!(config(Some("  ")).validate().is_err());

        let mut no_db = config(None);
        no_db.database = PathBuf::new();
        assert!(no_db.validate().is_err());
    }

    #[test]
    fn test_require_user() {
        assert_eq!(config(Some(" alice ")).require_user().unwrap(), "alice");
        let err = config(None).require_user().unwrap_err();
        assert!(err.to_string().contains("--user"));
    }
}
