//! Session holder: login, logout and restore.

use tracing::{info, warn};

use super::{SHOP_OWNER_ROLE, Session, SessionStore};
use crate::api::ApiClient;
use crate::api::auth::LoginResponse;
use crate::error::{DashboardError, Result};

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).field("password", &"<redacted>").finish()
    }
}

/// Owns the current session and keeps the store in step with it.
pub struct AuthHolder<S: SessionStore> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> AuthHolder<S> {
    /// Restore whatever session `store` holds.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the persisted record cannot be read.
    pub fn restore(store: S) -> Result<Self> {
        let current = store.load()?;
        if let Some(session) = &current {
            info!(user_id = %session.id, role = %session.role, "session restored");
        }
        Ok(Self { store, current })
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_shop_owner(&self) -> bool {
        self.current.as_ref().is_some_and(Session::is_shop_owner)
    }

    /// The current session, provided it belongs to a shop owner.
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` without a session, `NotShopOwner` for any other role.
    pub fn require_shop_owner(&self) -> Result<&Session> {
        let session = self.current.as_ref().ok_or(DashboardError::NotLoggedIn)?;
        if !session.is_shop_owner() {
            return Err(DashboardError::NotShopOwner { role: session.role.clone() });
        }
        Ok(session)
    }

    /// Log in through `client` and persist the resulting session.
    ///
    /// Nothing is stored unless the account is a shop owner.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when `/login` rejects the request, `NotShopOwner`
    /// for any other role, `Store` when persisting fails.
    pub async fn login(&mut self, client: &ApiClient, credentials: &Credentials) -> Result<Session> {
        let response = client.login(credentials).await?;
        let session = session_from_login(response).inspect_err(|e| {
            warn!(email = %credentials.email, error = %e, "login rejected");
        })?;

        self.store.save(&session)?;
        self.current = Some(session.clone());
        info!(user_id = %session.id, "logged in");
        Ok(session)
    }

    /// Drop the in-memory session and clear the store.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the persisted record cannot be removed; the
    /// in-memory session is gone regardless.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(session) = self.current.take() {
            info!(user_id = %session.id, "logged out");
        }
        self.store.clear()
    }
}

pub(crate) fn session_from_login(response: LoginResponse) -> Result<Session> {
    let role = response.role.unwrap_or_default();
    if role != SHOP_OWNER_ROLE {
        return Err(DashboardError::NotShopOwner { role });
    }
    Ok(Session { token: response.access_token, id: response.user_id, role })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
