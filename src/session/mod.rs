//! Logged-in identity and its persistence.
//!
//! DESIGN
//! ======
//! A session is the `{token, id, role}` triple returned by `/login`. It is
//! persisted through a `SessionStore` and restored on start-up only when all
//! three parts are present. There is no refresh or expiry tracking: a stale
//! token surfaces as a 401 on the next backend call.
//!
//! The session is never global. Callers pass it to
//! [`crate::ApiClient::with_session`] to obtain an authorized client.

pub mod auth;
pub mod store;

use serde::{Deserialize, Serialize};

pub use auth::{AuthHolder, Credentials};
pub use store::{FileStore, MemoryStore, SessionStore};

/// Role permitted to use the dashboard.
pub const SHOP_OWNER_ROLE: &str = "SHOP_OWNER";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub id: String,
    pub role: String,
}

impl Session {
    #[must_use]
    pub fn is_shop_owner(&self) -> bool {
        self.role == SHOP_OWNER_ROLE
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("id", &self.id)
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
