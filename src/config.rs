use crate::core::{Neo4jError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_USERNAME: &str = "neo4j";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DATABASE: &str = "neo4j";
pub const DEFAULT_FETCH_SIZE: usize = 200;

pub const ENV_URI: &str = "NEO4J_URI";
pub const ENV_USERNAME: &str = "NEO4J_USERNAME";
pub const ENV_PASSWORD: &str = "NEO4J_PASSWORD";
pub const ENV_DATABASE: &str = "NEO4J_DATABASE";
pub const ENV_FETCH_SIZE: &str = "NEO4J_FETCH_SIZE";

/// URI schemes understood by the Bolt driver.
pub const SUPPORTED_SCHEMES: &[&str] = &["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// One layer of connection settings. Every field is optional; layers are
/// merged with [`ConnectionSettings::or`] before being validated.
#[derive(Default, Clone, PartialEq, Deserialize)]
pub struct ConnectionSettings {
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub fetch_size: Option<usize>,
}

impl ConnectionSettings {
    /// Reads the `NEO4J_*` variables through `lookup`.
    ///
    /// An unparsable `NEO4J_FETCH_SIZE` is a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch_size = match lookup(ENV_FETCH_SIZE) {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<usize>().map_err(|e| {
                Neo4jError::Config(format!("Invalid {} '{}': {}", ENV_FETCH_SIZE, raw, e))
            })?),
            _ => None,
        };

        Ok(ConnectionSettings {
            uri: lookup(ENV_URI),
            username: lookup(ENV_USERNAME),
            password: lookup(ENV_PASSWORD),
            database: lookup(ENV_DATABASE),
            fetch_size,
        })
    }

    /// Fills every unset (or blank) field from `fallback`.
    pub fn or(self, fallback: ConnectionSettings) -> ConnectionSettings {
        ConnectionSettings {
            uri: given(self.uri).or_else(|| given(fallback.uri)),
            username: given(self.username).or_else(|| given(fallback.username)),
            password: given(self.password).or_else(|| given(fallback.password)),
            database: given(self.database).or_else(|| given(fallback.database)),
            fetch_size: self.fetch_size.or(fallback.fetch_size),
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("fetch_size", &self.fetch_size)
            .finish()
    }
}

fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Top-level structure of the optional TOML configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub connection: Option<ConnectionSettings>,
}

/// Loads a configuration file from the given path.
///
/// # Example
///
/// ```no_run
/// let file = neo4j_learning::config::load_config("neo4j-learning.toml")?;
/// println!("{:?}", file.connection);
/// # Ok::<(), neo4j_learning::core::Neo4jError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Neo4jError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Per-user configuration file location, e.g. `~/.config/neo4j-learning/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("neo4j-learning").join("config.toml"))
}

/// Validated connection parameters for one Neo4j database.
///
/// Values are checked once at construction and cannot change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    uri: String,
    username: String,
    password: String,
    database: String,
    fetch_size: usize,
}

impl Neo4jConfig {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// `Neo4jError::Config` when the URI is empty, lacks a supported scheme or
    /// host, or when any credential or the database name is empty.
    pub fn new(
        uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self> {
        let config = Neo4jConfig {
            uri: uri.into(),
            username: username.into(),
            password: password.into(),
            database: database.into(),
            fetch_size: DEFAULT_FETCH_SIZE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy using a different driver fetch size.
    pub fn with_fetch_size(mut self, fetch_size: usize) -> Result<Self> {
        self.fetch_size = fetch_size;
        self.validate()?;
        Ok(self)
    }

    /// Reads the `NEO4J_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::resolve(ConnectionSettings::default(), None, |key| std::env::var(key).ok())
    }

    /// Merges explicit values, the environment (through `lookup`) and an
    /// optional file layer, in that order of precedence, then applies the
    /// defaults and validates.
    pub fn resolve<F>(explicit: ConnectionSettings, file: Option<ConnectionSettings>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let merged = explicit
            .or(ConnectionSettings::from_lookup(lookup)?)
            .or(file.unwrap_or_default());

        let config = Neo4jConfig {
            uri: merged.uri.unwrap_or_else(|| DEFAULT_URI.to_string()),
            username: merged.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: merged.password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            database: merged.database.unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            fetch_size: merged.fetch_size.unwrap_or(DEFAULT_FETCH_SIZE),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn fetch_size(&self) -> usize {
        self.fetch_size
    }

    fn validate(&self) -> Result<()> {
        validate_uri(&self.uri)?;
        if self.username.is_empty() {
            return Err(Neo4jError::Config("username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(Neo4jError::Config("password must not be empty".to_string()));
        }
        if self.database.is_empty() {
            return Err(Neo4jError::Config("database name must not be empty".to_string()));
        }
        if self.fetch_size == 0 {
            return Err(Neo4jError::Config("fetch size must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Checks that `uri` parses, uses a supported scheme and names a host. The
/// port, when present, must be a valid `u16`.
pub fn validate_uri(uri: &str) -> Result<()> {
    if uri.trim().is_empty() {
        return Err(Neo4jError::Config("URI must not be empty".to_string()));
    }

    if !uri.contains("://") {
        return Err(Neo4jError::Config(format!(
            "URI '{}' is missing a scheme (expected one of: {})",
            uri,
            SUPPORTED_SCHEMES.join(", ")
        )));
    }

    let url = Url::parse(uri)
        .map_err(|e| Neo4jError::Config(format!("URI '{}' is malformed: {}", uri, e)))?;

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(Neo4jError::Config(format!(
            "URI '{}' uses unsupported scheme '{}' (expected one of: {})",
            uri,
            url.scheme(),
            SUPPORTED_SCHEMES.join(", ")
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(Neo4jError::Config(format!("URI '{}' has no host", uri))),
    }
}

impl fmt::Display for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Neo4jConfig(uri='{}', username='{}', database='{}')",
            self.uri, self.username, self.database
        )
    }
}

impl fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("fetch_size", &self.fetch_size)
            .finish()
    }
}
