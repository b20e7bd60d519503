//! `/login` exchange.

use serde::Deserialize;
use tracing::{debug, warn};

use super::ApiClient;
use crate::error::{DashboardError, Result, detail_from_body};
use crate::models::de;
use crate::session::Credentials;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(deserialize_with = "de::id_string")]
    pub user_id: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl ApiClient {
    /// POST `/login` as a form with `username`/`password`. Needs no token.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` with the backend detail on any non-success
    /// status, `Transport`/`Decode` otherwise.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!(email = %credentials.email, "login request");
        let response = self
            .http
            .post(self.url("/login"))
            .form(&[("username", credentials.email.as_str()), ("password", credentials.password.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let detail = detail_from_body(&text);
            warn!(status = status.as_u16(), %detail, "login failed");
            return Err(DashboardError::InvalidCredentials { detail });
        }

        super::decode_body(&text)
    }
}
