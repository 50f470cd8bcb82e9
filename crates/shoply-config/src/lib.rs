//! Shared configuration and local persistence for the shoply CLI.
//!
//! TOML configuration (file + `SHOPLY_` environment overrides) and the
//! file-backed [`SessionStore`] implementation -- the local key-value
//! storage that keeps the login flag and role between invocations.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use shoply_core::{CoreError, Session, SessionStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Storefront backend base URL.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Simulated add-to-cart latency in milliseconds. The explicit
    /// latency-injection knob: tests and impatient shoppers set it to 0.
    #[serde(default = "default_add_to_cart_delay_ms")]
    pub add_to_cart_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            timeout: default_timeout(),
            add_to_cart_delay_ms: default_add_to_cart_delay_ms(),
        }
    }
}

fn default_backend() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_add_to_cart_delay_ms() -> u64 {
    500
}

impl Config {
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        self.backend.parse().map_err(|_| ConfigError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {}", self.backend),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn add_to_cart_delay(&self) -> Duration {
        Duration::from_millis(self.add_to_cart_delay_ms)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "shoply")
}

/// Path of the TOML config file.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("shoply.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Path of the persisted session flags.
pub fn session_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(".shoply-session.json"),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

// ── Load / save ─────────────────────────────────────────────────────

/// Load the config: defaults, then the config file, then `SHOPLY_*`
/// environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("SHOPLY_"))
        .extract()?;
    Ok(config)
}

/// Load the config, falling back to defaults if anything is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write the config file, creating parent directories as needed.
pub fn save_config(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(config)?)?;
    Ok(path)
}

// ── File-backed session store ───────────────────────────────────────

/// [`SessionStore`] persisted as a small JSON document. No schema
/// versioning and no expiry: the session is valid until `clear`
/// deletes the file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the platform default location.
    pub fn default_location() -> Self {
        Self {
            path: session_path(),
        }
    }

    /// Store at an explicit path (tests, unusual setups).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn store_error(err: impl std::fmt::Display) -> CoreError {
        CoreError::SessionStore {
            message: err.to_string(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, CoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Self::store_error(err)),
        };
        // An unreadable session is treated as logged out rather than
        // locking the user into a broken state.
        Ok(serde_json::from_str(&contents).ok())
    }

    fn save(&self, session: &Session) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(Self::store_error)?;
        }
        let contents = serde_json::to_string_pretty(session).map_err(Self::store_error)?;
        std::fs::write(&self.path, contents).map_err(Self::store_error)
    }

    fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::store_error(err)),
        }
    }
}
