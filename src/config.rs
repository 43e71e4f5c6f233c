//! Runtime configuration.
//!
//! Values come from a key lookup (build-time env in the browser, a map in
//! tests) and fall back to the defaults below.

use crate::error::{Result, TrackerError};
use log::LevelFilter;

// =========================================================
// Keys & Defaults
// =========================================================

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_AUTH_DOMAIN: &str = "tasktracker.eu.auth0.com";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const KEY_API_BASE_URL: &str = "TASKTRACKER_API_BASE_URL";
pub const KEY_AUTH_DOMAIN: &str = "TASKTRACKER_AUTH_DOMAIN";
pub const KEY_AUTH_CLIENT_ID: &str = "TASKTRACKER_AUTH_CLIENT_ID";
pub const KEY_AUTH_AUDIENCE: &str = "TASKTRACKER_AUTH_AUDIENCE";
pub const KEY_LOG_LEVEL: &str = "TASKTRACKER_LOG_LEVEL";

// =========================================================
// Application Config
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix of every API path, without a trailing slash
    pub api_base_url: String,
    /// Identity provider tenant domain
    pub auth_domain: String,
    /// Identity provider application id
    pub auth_client_id: String,
    /// API audience requested with the access token
    pub auth_audience: Option<String>,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Builds the config from a lookup, using defaults for missing or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: read(KEY_API_BASE_URL)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            auth_domain: read(KEY_AUTH_DOMAIN).unwrap_or_else(|| DEFAULT_AUTH_DOMAIN.to_string()),
            auth_client_id: read(KEY_AUTH_CLIENT_ID).unwrap_or_default(),
            auth_audience: read(KEY_AUTH_AUDIENCE),
            log_level: read(KEY_LOG_LEVEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    /// Rejects configurations the identity provider cannot work with.
    pub fn validate(self) -> Result<Self> {
        if self.auth_client_id.is_empty() {
            return Err(TrackerError::config(format!("{} is not set", KEY_AUTH_CLIENT_ID))
                .in_op("config.validate"));
        }
        if self.auth_domain.contains("://") {
            return Err(TrackerError::config(format!(
                "{} must be a bare host name, got {}",
                KEY_AUTH_DOMAIN, self.auth_domain
            ))
            .in_op("config.validate"));
        }
        Ok(self)
    }
}
