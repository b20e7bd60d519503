//! Session persistence backends.
//!
//! The on-disk record is a flat JSON object keyed `userToken`, `userId` and
//! `userRole`. Partial records load as "no session".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::Session;
use crate::error::{DashboardError, Result};

/// Where a session lives between runs.
pub trait SessionStore {
    /// Load the persisted session, `None` when absent or incomplete.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the backing storage cannot be read or parsed.
    fn load(&self) -> Result<Option<Session>>;

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the backing storage cannot be written.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove any persisted session.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the backing storage cannot be cleared.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "userToken", default)]
    user_token: Option<String>,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(rename = "userRole", default)]
    user_role: Option<String>,
}

impl PersistedSession {
    fn from_session(session: &Session) -> Self {
        Self {
            user_token: Some(session.token.clone()),
            user_id: Some(session.id.clone()),
            user_role: Some(session.role.clone()),
        }
    }

    fn into_session(self) -> Option<Session> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(Session {
            token: present(self.user_token)?,
            id: present(self.user_id)?,
            role: present(self.user_role)?,
        })
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error("read", &self.path, &e)),
        };
        let persisted: PersistedSession =
            serde_json::from_str(&contents).map_err(|e| store_error("parse", &self.path, &e))?;
        Ok(persisted.into_session())
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| store_error("create", parent, &e))?;
            }
        }
        let json = serde_json::to_string_pretty(&PersistedSession::from_session(session))
            .map_err(|e| store_error("encode", &self.path, &e))?;
        fs::write(&self.path, json).map_err(|e| store_error("write", &self.path, &e))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("remove", &self.path, &e)),
        }
    }
}

fn store_error(action: &str, path: &Path, err: &dyn std::fmt::Display) -> DashboardError {
    DashboardError::Store(format!("{action} {}: {err}", path.display()))
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Option<Session>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn seeded(session: Session) -> Self {
        Self { inner: Arc::new(Mutex::new(Some(session))) }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.inner.lock().map_err(|_| DashboardError::Store("memory store lock poisoned".into()))
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
