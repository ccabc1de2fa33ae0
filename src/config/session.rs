//! # Session Cookie Configuration
//!
//! Policy applied to every session cookie this application writes:
//! the access token, the refresh token, the active band id and the cached
//! band memberships.
//!
//! All four slots share the same transport attributes (`HttpOnly`,
//! `SameSite=Lax`, `Path=/`, `Secure` in production). The access token and
//! the non-token slots live for 7 days; the refresh token lives for 30 days
//! so a returning user can still mint a new access token after the shorter
//! cookies have lapsed.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `SESSION_COOKIE_SECURE` | Force the `Secure` flag on session cookies | `true` in production |
//! | `SESSION_MAX_AGE_DAYS` | Max-age of the access token and band cookies | `7` |
//! | `REFRESH_MAX_AGE_DAYS` | Max-age of the refresh token cookie | `30` |

use crate::config::env::{read_flag, read_u32};

/// Cookie policy for the four session slots.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Max-age in days for the access token, active band and band list
    /// cookies.
    pub max_age_days: u32,
    /// Max-age in days for the refresh token cookie.
    pub refresh_max_age_days: u32,
}

impl SessionConfig {
    /// Loads the cookie policy from environment variables.
    ///
    /// `Secure` defaults to on only for production deployments, so local
    /// plain-HTTP development keeps working.
    pub fn from_env(app_env: &str) -> Self {
        SessionConfig {
            cookie_secure: read_flag("SESSION_COOKIE_SECURE", app_env == "production"),
            max_age_days: read_u32("SESSION_MAX_AGE_DAYS", 7),
            refresh_max_age_days: read_u32("REFRESH_MAX_AGE_DAYS", 30),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            cookie_secure: false,
            max_age_days: 7,
            refresh_max_age_days: 30,
        }
    }
}
