//! Wire types for the backend endpoints the front end consumes directly.
//!
//! Every remote response is deserialized into one of these at the
//! boundary; handlers never poke at untyped JSON.

use serde::{Deserialize, Serialize};

/// One band the user belongs to, as cached in the `user_bands` cookie and
/// returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandMembership {
    pub id: i64,
    pub name: String,
}

/// A fresh access/refresh token pair from `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// The new access token. The backend names this field `token`.
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile/role document from `GET /user/info`, scoped to the active band.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub band_name: String,
    pub role: String,
}

/// Successful login/signup response: the initial session material.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    /// Initial access token.
    pub token: String,
    /// Refresh token; older backend versions omit it.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Bands the user belongs to; the first one becomes the active band.
    #[serde(default)]
    pub bands: Vec<BandMembership>,
}

/// Error body shape used by the backend for rejected requests.
#[derive(Debug, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
