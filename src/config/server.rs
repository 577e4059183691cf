//! Server profile settings.

use super::ConfigError;
use mysql_async::{Opts, OptsBuilder};
use serde::Deserialize;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

/// Connection settings of one named server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub db_user: String,
    pub db_password: String,
    #[serde(default = "default_host")]
    pub db_host: String,
    #[serde(default = "default_port")]
    pub db_port: u16,
    /// Database used when none is given on the command line.
    #[serde(default)]
    pub db_name: Option<String>,
}

impl ServerConfig {
    /// Build MySQL connection options, `database` overriding `db_name`.
    pub fn to_opts(&self, server: &str, database: Option<&str>) -> Result<Opts, ConfigError> {
        let database = database
            .or(self.db_name.as_deref())
            .ok_or_else(|| ConfigError::MissingDatabase(server.to_string()))?;

        let builder = OptsBuilder::default()
            .ip_or_hostname(self.db_host.clone())
            .tcp_port(self.db_port)
            .user(Some(self.db_user.clone()))
            .pass(Some(self.db_password.clone()))
            .db_name(Some(database.to_string()));

        Ok(Opts::from(builder))
    }
}
