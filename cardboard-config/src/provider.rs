//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery, CONFIG_DIR};
use crate::error::{ConfigError, ConfigResult};
use crate::types::{CardboardConfig, ConfigOverrides, DEFAULT_DATABASE, DEFAULT_LOG_FILTER};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use tracing::{debug, trace};

/// Environment variable prefix, e.g. `CARDBOARD_DATABASE`
pub const ENV_PREFIX: &str = "CARDBOARD_";

/// Loads [`CardboardConfig`] from every source.
///
/// Sources in precedence order (later sources override earlier ones):
/// 1. Defaults
/// 2. `~/.cardboard/config.{toml,yaml,yml,json}`
/// 3. `./.cardboard/config.{toml,yaml,yml,json}`
/// 4. `CARDBOARD_*` environment variables
/// 5. Explicit overrides (command-line flags)
///
/// Nothing is cached; every call reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific file discovery, mainly for tests
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration
    pub fn load(&self, overrides: &ConfigOverrides) -> ConfigResult<CardboardConfig> {
        let config: CardboardConfig = self.build_figment(overrides)?.extract()?;
        config.validate()?;
        debug!(
            database = %config.database.display(),
            user = config.user.as_deref().unwrap_or("<none>"),
            "loaded configuration"
        );
        Ok(config)
    }

    fn build_figment(&self, overrides: &ConfigOverrides) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(self.defaults()?));

        for file in self.discovery.discover_all() {
            trace!(path = %file.path.display(), format = ?file.format, "merging config file");
            figment = figment.merge(Self::file_provider(&file));
        }

        Ok(figment
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
            .merge(Serialized::defaults(overrides)))
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
            ConfigFormat::Json => Figment::from(Json::file(&file.path)),
        }
    }

    /// Database under the global config directory, or under the working
    /// directory when no home directory is known
    fn defaults(&self) -> ConfigResult<CardboardConfig> {
        let dir = match self.discovery.global_dir() {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|_| ConfigError::CurrentDirectoryNotFound)?
                .join(CONFIG_DIR),
        };

        Ok(CardboardConfig {
            database: dir.join(DEFAULT_DATABASE),
            user: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        })
    }
}
