//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8000/media";
pub const DEFAULT_STORAGE_PATH: &str = ".pawsconnect/storage.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value} (expected an http:// or https:// URL)")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub media_base_url: String,
    pub storage_path: PathBuf,
    pub timeouts: RequestTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            timeouts: RequestTimeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `PAWS_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `PAWS_MEDIA_BASE_URL`: default `http://localhost:8000/media`
    /// - `PAWS_STORAGE_PATH`: default `.pawsconnect/storage.json`
    /// - `PAWS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PAWS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if either base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = parse_base_url(
            "PAWS_API_BASE_URL",
            std::env::var("PAWS_API_BASE_URL").ok().as_deref(),
            DEFAULT_API_BASE_URL,
        )?;
        let media_base_url = parse_base_url(
            "PAWS_MEDIA_BASE_URL",
            std::env::var("PAWS_MEDIA_BASE_URL").ok().as_deref(),
            DEFAULT_MEDIA_BASE_URL,
        )?;
        let storage_path = std::env::var("PAWS_STORAGE_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let timeouts = RequestTimeouts {
            request_secs: env_parse_u64("PAWS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PAWS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, media_base_url, storage_path, timeouts })
    }

    /// Replace the API base URL, applying the same normalization as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an http(s) URL.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url("PAWS_API_BASE_URL", Some(raw), DEFAULT_API_BASE_URL)?;
        Ok(self)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_base_url(var: &'static str, raw: Option<&str>, default: &str) -> Result<String, ConfigError> {
    let value = raw.map_or(default, str::trim);
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: value.to_owned() });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
