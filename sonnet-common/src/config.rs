//! Bootstrap configuration and root folder resolution
//!
//! Configuration is an explicit value handed to whatever needs it; nothing
//! here is process-global. Sources, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable (`SONNET_ROOT_FOLDER`)
//! 3. TOML config file
//! 4. OS-dependent compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "SONNET_ROOT_FOLDER";

/// Default database file name inside the root folder
pub const DEFAULT_DATABASE_FILE: &str = "rhymes.db";

/// Bootstrap configuration loaded from TOML
///
/// Every field has a built-in default, so an absent or partial file is valid.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Root folder holding the database (overridden by CLI and environment)
    pub root_folder: Option<PathBuf>,

    /// Database file name, relative to the root folder
    pub database_file: String,

    /// Connection pool settings
    pub database: DatabaseConfig,

    /// External rhyme provider settings
    pub provider: ProviderConfig,

    /// Poem document source settings
    pub source: SourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            database: DatabaseConfig::default(),
            provider: ProviderConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// SQLite pool settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// How long a connection waits on a locked database before failing
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 8,
            busy_timeout_ms: 5000,
        }
    }
}

/// Rhyme provider (Datamuse) settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Minimum interval between two provider requests
    pub rate_limit_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.datamuse.com".to_string(),
            rate_limit_ms: 100,
            timeout_secs: 30,
            user_agent: concat!("sonnet-rhymes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Poem document source settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// CSS selector matching one element per poem
    pub poem_selector: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "http://www.gutenberg.org/files/1041/1041-h/1041-h.htm".to_string(),
            poem_selector: "p.poem".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BootstrapConfig {
    /// Load configuration from an explicit file, the default location, or defaults
    ///
    /// An explicit path must exist. The default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Config file that [`BootstrapConfig::load`] would read, if any
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.exists()),
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Full path of the database file inside `root_folder`
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.database_file)
    }
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &BootstrapConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    get_default_root_folder()
}

/// Default configuration file path (`<config dir>/sonnet/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sonnet").join("config.toml"))
}

/// Get OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("sonnet"))
        .unwrap_or_else(|| PathBuf::from("./sonnet_data"))
}
