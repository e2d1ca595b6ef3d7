//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (RFCD_*)
//! 2. TOML config file (if RFCD_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! Components never read the environment themselves; they receive the values
//! they need from an [`AppConfig`] at construction.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (RFCD_*)
/// 2. TOML config file (if RFCD_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite catalog database.
    ///
    /// Set via RFCD_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Directory holding one cached `<id>.html` file per materialized RFC.
    ///
    /// Set via RFCD_DOCUMENTS_DIR environment variable.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// URL of the catalog index.
    ///
    /// Set via RFCD_INDEX_URL environment variable.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Base URL that `<id>.html` is appended to when fetching a document.
    ///
    /// Set via RFCD_DOCUMENT_BASE_URL environment variable.
    #[serde(default = "default_document_base_url")]
    pub document_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via RFCD_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via RFCD_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to accept per response. The index is roughly 15MB.
    ///
    /// Set via RFCD_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./.rfc/sqlite3/rfc.db")
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./.rfc/downloads/rfcs")
}

fn default_index_url() -> String {
    "https://www.rfc-editor.org/rfc-index.xml".into()
}

fn default_document_base_url() -> String {
    "https://www.rfc-editor.org/rfc/".into()
}

fn default_user_agent() -> String {
    "rfcd/0.1".into()
}

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_max_bytes() -> usize {
    64 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            documents_dir: default_documents_dir(),
            index_url: default_index_url(),
            document_base_url: default_document_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `RFCD_`
    /// 2. TOML file from `RFCD_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack used by [`AppConfig::load`].
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("RFCD_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("RFCD_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary provider stack.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
