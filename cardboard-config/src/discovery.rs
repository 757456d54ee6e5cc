//! Locating configuration files
//!
//! Two directories are searched, lowest precedence first:
//!
//! 1. `~/.cardboard/` (global)
//! 2. `./.cardboard/` (project, relative to the working directory)
//!
//! In each, `config.toml`, `config.yaml`, `config.yml` and `config.json` are
//! picked up in that order when present.

use std::path::{Path, PathBuf};
use tracing::trace;

/// Name of the configuration directory in home and project roots
pub const CONFIG_DIR: &str = ".cardboard";

const CONFIG_STEM: &str = "config";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A configuration file that exists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Finds configuration files under the global and project roots
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    home: Option<PathBuf>,
    project: Option<PathBuf>,
}

impl FileDiscovery {
    /// Search the user's home directory and the current working directory
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
            project: std::env::current_dir().ok(),
        }
    }

    /// Search explicit roots; `None` skips that level
    pub fn with_roots(home: Option<PathBuf>, project: Option<PathBuf>) -> Self {
        Self { home, project }
    }

    /// The global configuration directory, if a home directory is known
    pub fn global_dir(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join(CONFIG_DIR))
    }

    /// Existing configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();
        for root in [&self.home, &self.project].into_iter().flatten() {
            files.extend(Self::discover_in(&root.join(CONFIG_DIR)));
        }
        files
    }

    fn discover_in(dir: &Path) -> Vec<ConfigFile> {
        ["toml", "yaml", "yml", "json"]
            .iter()
            .filter_map(|extension| {
                let path = dir.join(format!("{}.{}", CONFIG_STEM, extension));
                let format = ConfigFormat::from_extension(extension)?;
                if path.is_file() {
                    trace!(path = %path.display(), "found config file");
                    Some(ConfigFile { path, format })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}
