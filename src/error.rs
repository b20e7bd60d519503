//! Crate error type.
//!
//! ERROR HANDLING
//! ==============
//! Every backend call funnels into `DashboardError`. A non-success response
//! keeps the backend's `detail` payload so a page can show it verbatim; a
//! structured `detail` (validation lists) is kept as its JSON text.

use serde_json::Value;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Fallback message when a failed response carries no `detail`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors produced by the dashboard core.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A configuration value is missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status}, message: {detail}")]
    Status { status: u16, detail: String },

    /// The backend body did not match the expected record shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// `/login` rejected the submitted credentials.
    #[error("login failed: {detail}")]
    InvalidCredentials { detail: String },

    /// Credentials were valid but the account is not a shop owner.
    #[error("Not authorized as shop owner (role: {role})")]
    NotShopOwner { role: String },

    /// An authorized call was attempted without a session.
    #[error("No user token available. Please log in again.")]
    NotLoggedIn,

    /// Reading or writing the persisted session failed.
    #[error("session store error: {0}")]
    Store(String),

    /// A client-side form check failed before anything was sent.
    #[error("{0}")]
    Validation(String),
}

impl DashboardError {
    /// True when the backend rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Extract the user-facing message from a failed response body.
///
/// A string `detail` is returned as-is, any other `detail` value as its JSON
/// text, and anything else as [`UNKNOWN_ERROR`].
#[must_use]
pub fn detail_from_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(Value::Null) | None => UNKNOWN_ERROR.to_string(),
            Some(other) => other.to_string(),
        },
        _ => UNKNOWN_ERROR.to_string(),
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
