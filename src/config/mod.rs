//! Config file with named server profiles.
//!
//! ```toml
//! [default]
//! db_user = "root"
//! db_password = "secret"
//! db_name = "experiments"
//!
//! [analytics]
//! db_user = "writer"
//! db_password = "secret"
//! db_host = "10.0.0.12"
//! db_port = 3307
//! ```

mod server;

pub use server::ServerConfig;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".dbify.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error parsing TOML
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Requested profile is absent
    #[error("Server '{0}' not found in config")]
    ServerNotFound(String),

    /// Neither the command line nor the profile names a database
    #[error("No database given: pass --database or set db_name for server '{0}'")]
    MissingDatabase(String),

    /// No explicit path and no home directory to look in
    #[error("No config file: pass --config or set HOME")]
    NoConfigPath,

    /// Malformed `--connection-string`
    #[error("Invalid connection string: {0}")]
    InvalidUrl(#[from] mysql_async::UrlError),
}

/// All server profiles, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct ConfigFile {
    pub servers: BTreeMap<String, ServerConfig>,
}

impl ConfigFile {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// `$HOME/.dbify.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_FILE))
            .ok_or(ConfigError::NoConfigPath)
    }

    pub fn server(&self, name: &str) -> Result<&ServerConfig, ConfigError> {
        self.servers
            .get(name)
            .ok_or_else(|| ConfigError::ServerNotFound(name.to_string()))
    }
}
