//! PetPaw shop-owner dashboard core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shop owner works against a remote REST backend that owns every order,
//! appointment, prescription and booking. This crate is the headless half of
//! the dashboard: a persisted session, a typed API client, one page holder per
//! dashboard view, and the analytics reductions those views render.
//!
//! ARCHITECTURE
//! ============
//! - `session` persists `{token, id, role}` and gates on the shop-owner role.
//! - `api` wraps the backend endpoints behind a single `ApiClient`.
//! - `pages` own fetched data, expose `reload()`, and re-fetch after actions.
//! - `analytics` are pure reductions over fetched records.
//!
//! The session is never ambient: callers hand it to `ApiClient::with_session`
//! and pass the resulting client to each page.

pub mod analytics;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod pages;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::ApiClient;
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use session::{AuthHolder, Credentials, FileStore, MemoryStore, Session, SessionStore};
