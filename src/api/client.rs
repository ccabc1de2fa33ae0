//! # Backend API Port
//!
//! [`BackendApi`] abstracts the handful of backend endpoints the session
//! flow calls directly (everything else goes through the generic reverse
//! proxy). The interceptor and the route handlers depend on the trait,
//! not on the HTTP client, so tests can count and script remote calls
//! without a network.
//!
//! [`HttpBackendApi`] is the production implementation: one `reqwest`
//! client with a bounded timeout, shared across requests.

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::json;

use crate::api::types::{AuthSession, BackendErrorBody, TokenPair, UserInfo};
use crate::config::ApiConfig;
use crate::error::{AuthActionError, EnrichmentError, RefreshError};

/// Header carrying the active band id on data-bearing backend calls.
pub const BAND_ID_HEADER: &str = "X-Band-ID";

/// The backend endpoints consumed by the session flow and auth actions.
///
/// Each method performs exactly one remote call; retry policy belongs to
/// the caller (and the protocol forbids retries within a request).
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Exchanges a refresh token for a new access/refresh pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError>;

    /// Fetches the profile/role document for the given band.
    async fn user_info(&self, access_token: &str, band_id: i64)
    -> Result<UserInfo, EnrichmentError>;

    /// Authenticates a user by credentials.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthActionError>;

    /// Creates a user together with their first band.
    async fn signup(
        &self,
        band_name: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, AuthActionError>;

    /// Revokes a refresh token server-side. Best-effort: the caller has
    /// already cleared the session when this runs.
    async fn revoke(&self, access_token: &str, refresh_token: &str)
    -> Result<(), AuthActionError>;
}

/// Production [`BackendApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackendApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackendApi {
    /// Builds the client from [`ApiConfig`], applying its timeout to every
    /// call this instance makes.
    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(u64::from(cfg.timeout_secs)))
            .build()?;

        Ok(Self::from_parts(http, cfg.base_url.clone()))
    }

    /// Wraps an existing client, so the proxy and the auth flows can share
    /// one connection pool.
    pub fn from_parts(http: reqwest::Client, base_url: String) -> Self {
        HttpBackendApi { http, base_url }
    }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> reqwest::Client {
        self.http.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `None` when the token contains bytes a header cannot carry; the
    /// call then goes out without `Authorization`, like the proxy does
    /// for unusable tokens.
    fn bearer(token: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!("Bearer {token}")).ok()
    }

    /// Maps a rejected auth-action response into [`AuthActionError::Rejected`],
    /// extracting the backend's error message when the body has one.
    async fn rejection(response: reqwest::Response) -> AuthActionError {
        let status = response.status();
        let message = response
            .json::<BackendErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| "Une erreur est survenue.".to_string());
        AuthActionError::Rejected { status, message }
    }
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(RefreshError::Transport)?;

        if !response.status().is_success() {
            return Err(RefreshError::Status(response.status()));
        }

        response.json().await.map_err(RefreshError::Malformed)
    }

    async fn user_info(
        &self,
        access_token: &str,
        band_id: i64,
    ) -> Result<UserInfo, EnrichmentError> {
        let mut request = self
            .http
            .get(self.url("/user/info"))
            .header(BAND_ID_HEADER, band_id.to_string());
        if let Some(value) = Self::bearer(access_token) {
            request = request.header(AUTHORIZATION, value);
        }
        let response = request.send().await.map_err(EnrichmentError::Transport)?;

        if !response.status().is_success() {
            return Err(EnrichmentError::Status(response.status()));
        }

        response.json().await.map_err(EnrichmentError::Malformed)
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthActionError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(AuthActionError::Transport)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response.json().await.map_err(AuthActionError::Malformed)
    }

    async fn signup(
        &self,
        band_name: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, AuthActionError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({
                "band_name": band_name,
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(AuthActionError::Transport)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response.json().await.map_err(AuthActionError::Malformed)
    }

    async fn revoke(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), AuthActionError> {
        let mut request = self
            .http
            .post(self.url("/auth/logout"))
            .json(&json!({ "refresh_token": refresh_token }));
        if let Some(value) = Self::bearer(access_token) {
            request = request.header(AUTHORIZATION, value);
        }
        let response = request.send().await.map_err(AuthActionError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AuthActionError::Rejected {
                status,
                message: format!("logout rejected with status {status}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_onto_the_base() {
        let api = HttpBackendApi::new(&ApiConfig {
            base_url: "http://backend:8089/api".into(),
            timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(api.url("/auth/refresh"), "http://backend:8089/api/auth/refresh");
        assert_eq!(api.url("/user/info"), "http://backend:8089/api/user/info");
    }

    #[test]
    fn bearer_header_is_well_formed() {
        let value = HttpBackendApi::bearer("tok-123").unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn bearer_rejects_tokens_a_header_cannot_carry() {
        assert!(HttpBackendApi::bearer("tok\nwith-newline").is_none());
        assert!(HttpBackendApi::bearer("tok\rwith-cr").is_none());
    }
}
