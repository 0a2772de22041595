//! Client configuration loading and persistence.
//!
//! Configuration is resolved once at process entry into an immutable
//! [`ClientConfig`] that is passed to the dispatcher. Resolution precedence
//! for every value, highest first:
//!
//! 1. Explicit runtime override (builder methods)
//! 2. Environment variable (`KILN_API_KEY`, `KILN_API_URL`, ...)
//! 3. JSON config file value
//! 4. Hard-coded default
//!
//! The config file is a flat JSON object at a per-user path
//! (`~/.config/kiln/config.json` on Linux), overridable with
//! `KILN_CONFIG_LOCATION`. A missing or unreadable file counts as empty.

use crate::error::{ClientError, ClientResult};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.kiln.ai";
/// Web app endpoint, used to build status page links.
pub const DEFAULT_APP_URL: &str = "https://app.kiln.ai";
/// API version path segment inserted between the base URL and the route.
pub const DEFAULT_API_VERSION: &str = "v2";

/// Environment variable (and config file key) names.
pub const API_KEY_VAR: &str = "KILN_API_KEY";
pub const API_URL_VAR: &str = "KILN_API_URL";
pub const APP_URL_VAR: &str = "KILN_APP_URL";
pub const ORG_VAR: &str = "KILN_ORG";
pub const API_VERSION_VAR: &str = "KILN_API_VERSION";
pub const CONFIG_LOCATION_VAR: &str = "KILN_CONFIG_LOCATION";

/// Immutable client configuration.
///
/// Construct with [`ClientConfig::from_env`] and adjust with the builder
/// methods; the struct is read-only once handed to the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base API URL.
    pub api_url: String,
    /// Web app URL (status page links).
    pub app_url: String,
    /// Optional organization identifier.
    pub org: Option<String>,
    /// API version path segment.
    pub api_version: String,
}

impl ClientConfig {
    /// Resolve configuration from the environment and the config file.
    pub fn from_env() -> Self {
        let file = load_config_file(&config_file_path());
        Self::resolve(&file, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a config file map and an environment
    /// lookup. Pure with respect to process state, so precedence is
    /// testable without mutating the environment.
    pub fn resolve(file: &Map<String, Value>, env: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| -> String {
            env(key)
                .filter(|v| !v.is_empty())
                .or_else(|| file.get(key).and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| default.to_string())
        };

        let org = get(ORG_VAR, "");
        Self {
            api_key: get(API_KEY_VAR, ""),
            api_url: get(API_URL_VAR, DEFAULT_API_URL),
            app_url: get(APP_URL_VAR, DEFAULT_APP_URL),
            org: if org.is_empty() { None } else { Some(org) },
            api_version: get(API_VERSION_VAR, DEFAULT_API_VERSION),
        }
    }

    /// Override the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Override the base API URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the organization.
    #[must_use]
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }
}

/// Path of the JSON config file.
///
/// `KILN_CONFIG_LOCATION` wins; otherwise the per-user config directory.
pub fn config_file_path() -> PathBuf {
    if let Ok(location) = std::env::var(CONFIG_LOCATION_VAR) {
        if !location.is_empty() {
            return PathBuf::from(location);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kiln")
        .join("config.json")
}

/// Load the config file as a flat JSON object.
///
/// Missing or malformed files resolve to an empty map rather than an error;
/// the config file is optional.
pub fn load_config_file(path: &std::path::Path) -> Map<String, Value> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Write a single key into the config file, preserving other keys.
///
/// Creates the parent directory on first use.
pub fn write_config_value(key: &str, value: &str) -> ClientResult<()> {
    let path = config_file_path();
    let mut map = load_config_file(&path);
    map.insert(key.to_string(), Value::String(value.to_string()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ClientError::Config(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let content = serde_json::to_string_pretty(&Value::Object(map))
        .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(&path, content)
        .map_err(|e| ClientError::Config(format!("Failed to write {}: {}", path.display(), e)))
}
