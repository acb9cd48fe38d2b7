//! Process configuration: built-in defaults, an optional `config.toml`, then `EMPLOYEES_*` env.

use crate::error::RegistryError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "EMPLOYEES_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

/// Store connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub dialect: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub dbname: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dialect: "sqlite".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            username: String::new(),
            password: String::new(),
            dbname: "employees.sqlite".to_string(),
        }
    }
}

/// Store engines the storage layer can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl DatabaseConfig {
    pub fn dialect(&self) -> Result<Dialect, RegistryError> {
        match self.dialect.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(RegistryError::UnsupportedDialect(self.dialect.clone())),
        }
    }

    /// Build the driver URL for the configured dialect.
    ///
    /// SQLite only reads `dbname` (a file path, or `:memory:`). Postgres uses
    /// `host`, `port`, `username`, `password` and `dbname`; credentials are percent-encoded.
    pub fn connection_url(&self) -> Result<String, RegistryError> {
        match self.dialect()? {
            Dialect::Sqlite if self.is_in_memory() => Ok("sqlite::memory:".to_string()),
            Dialect::Sqlite => Ok(format!("sqlite:{}?mode=rwc", self.dbname)),
            Dialect::Postgres => self.postgres_url(),
        }
    }

    fn postgres_url(&self) -> Result<String, RegistryError> {
        let invalid = |what: &str| RegistryError::InvalidDatabaseUrl(format!("invalid {what}"));

        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| RegistryError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_host(Some(&self.host))
            .map_err(|e| RegistryError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_port(Some(self.port)).map_err(|()| invalid("port"))?;
        if !self.username.is_empty() {
            url.set_username(&self.username)
                .map_err(|()| invalid("username"))?;
        }
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| invalid("password"))?;
        }
        url.set_path(&self.dbname);
        Ok(url.to_string())
    }

    pub fn is_in_memory(&self) -> bool {
        self.dbname == ":memory:"
    }
}

impl Config {
    /// Load from `config.toml` in the working directory plus the environment.
    pub fn load() -> Result<Self, RegistryError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same layering as [`Config::load`], reading the given TOML file. A missing file is skipped.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let cfg = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(cfg)
    }
}
