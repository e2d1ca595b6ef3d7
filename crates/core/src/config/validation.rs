//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

fn check_http_url(field: &str, value: &str) -> Result<url::Url, ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| invalid(field, &format!("not a valid URL ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(invalid(field, "scheme must be http or https")),
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `db_path` or `documents_dir` is empty
    /// - `index_url` or `document_base_url` is not an http(s) URL
    /// - `document_base_url` does not end with `/`
    /// - `max_bytes` is 0 or exceeds 256MB
    /// - `timeout_ms` is less than 100ms or exceeds 10 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(invalid("db_path", "must not be empty"));
        }
        if self.documents_dir.as_os_str().is_empty() {
            return Err(invalid("documents_dir", "must not be empty"));
        }

        check_http_url("index_url", &self.index_url)?;
        let base = check_http_url("document_base_url", &self.document_base_url)?;
        if !base.path().ends_with('/') {
            return Err(invalid("document_base_url", "must end with '/'"));
        }

        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 256 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 256MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 600_000 {
            return Err(invalid("timeout_ms", "must not exceed 10 minutes (600000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.documents_dir.is_relative() || self.db_path.is_relative() {
            tracing::warn!(
                db_path = %self.db_path.display(),
                documents_dir = %self.documents_dir.display(),
                "relative storage paths resolve against the working directory"
            );
        }

        Ok(())
    }
}
