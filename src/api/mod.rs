//! REST client for the PetPaw backend.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` is a thin reqwest wrapper: it owns the base URL, the timeouts
//! and, once a session is attached, the bearer token. Endpoint groups live in
//! sibling modules as further `impl ApiClient` blocks (`shop`, `vet`,
//! `people`, `grooming`, `hotel`) so each resource reads as one unit.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses become `DashboardError::Status` carrying the
//! backend's `detail`. Empty bodies decode as JSON `null`, which lets DELETE
//! and bodiless POST endpoints share the same path. Nothing is retried.

pub mod auth;
pub mod grooming;
pub mod hotel;
pub mod people;
pub mod shop;
pub mod vet;

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, error};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result, detail_from_body};
use crate::session::Session;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    page_limit: u32,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authorized", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Unauthorized client for `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the HTTP client cannot be constructed.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| DashboardError::Config(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, base_url: config.api_url.clone(), page_limit: config.page_limit, token: None })
    }

    /// A copy of this client that authorizes as `session`.
    #[must_use]
    pub fn with_session(&self, session: &Session) -> Self {
        Self { token: Some(session.token.clone()), ..self.clone() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(DashboardError::NotLoggedIn)?;
        Ok(self.http.request(method, self.url(path)).bearer_auth(token))
    }

    // =========================================================================
    // VERBS
    // =========================================================================

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, self.authorized(Method::GET, path)?).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, path, self.authorized(Method::GET, path)?.query(query)).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, self.authorized(Method::POST, path)?.json(body)).await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::POST, path, self.authorized(Method::POST, path)?).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, self.authorized(Method::PUT, path)?.json(body)).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let request = self.authorized(method.clone(), path)?.multipart(form);
        self.send(method, path, request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let _: IgnoredAny = self.send(Method::DELETE, path, self.authorized(Method::DELETE, path)?).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str, request: RequestBuilder) -> Result<T> {
        debug!(%method, path, "backend request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = detail_from_body(&text);
            error!(%method, path, status = status.as_u16(), %detail, "backend request failed");
            return Err(DashboardError::Status { status: status.as_u16(), detail });
        }

        decode_body(&text)
    }
}

/// Decode a success body; an empty body reads as JSON `null`.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| DashboardError::Decode(e.to_string()))
}

/// Build a multipart form from text fields.
pub(crate) fn text_form(fields: Vec<(&'static str, String)>) -> Form {
    fields.into_iter().fold(Form::new(), |form, (key, value)| form.text(key, value))
}

/// Attach a file part to `form`.
///
/// # Errors
///
/// Returns `Validation` when `mime` is not a valid MIME type.
pub(crate) fn with_file(form: Form, field: &'static str, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<Form> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|e| DashboardError::validation(format!("invalid file type {mime}: {e}")))?;
    Ok(form.part(field, part))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
