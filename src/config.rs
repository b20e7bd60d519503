//! Dashboard configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SESSION_FILE: &str = "~/.config/petpaw/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
    pub page_limit: u32,
}

impl DashboardConfig {
    /// Config for `api_url` with every other value at its default.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the URL is blank or the default session path
    /// cannot be expanded.
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            session_file: expand_path(DEFAULT_SESSION_FILE)?,
            timeouts: Timeouts::default(),
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PETPAW_API_URL`: backend base URL, default `http://127.0.0.1:8000`
    /// - `PETPAW_SESSION_FILE`: persisted session path, `~` expanded
    /// - `PETPAW_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PETPAW_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PETPAW_PAGE_LIMIT`: `limit` for paged booking lists, default 100
    ///
    /// # Errors
    ///
    /// Returns `Config` for an empty base URL or an unexpandable session path.
    pub fn from_env() -> Result<Self> {
        let api_url = normalize_api_url(
            &std::env::var("PETPAW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;
        let session_file = expand_path(
            &std::env::var("PETPAW_SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string()),
        )?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("PETPAW_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PETPAW_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let page_limit = env_parse_u32("PETPAW_PAGE_LIMIT", DEFAULT_PAGE_LIMIT);

        Ok(Self { api_url, session_file, timeouts, page_limit })
    }

    /// Replace the base URL, e.g. from a `--api-url` flag.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the URL is blank.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = normalize_api_url(api_url)?;
        Ok(self)
    }

    /// Replace the session path, e.g. from a `--session-file` flag.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the path references an unset variable.
    pub fn with_session_file(mut self, path: &str) -> Result<Self> {
        self.session_file = expand_path(path)?;
        Ok(self)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn env_parse_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

pub(crate) fn normalize_api_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(DashboardError::Config("PETPAW_API_URL is empty".into()));
    }
    Ok(url.to_string())
}

pub(crate) fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).map_err(|e| DashboardError::Config(format!("invalid session path {raw}: {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
