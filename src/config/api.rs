//! # Backend API Configuration
//!
//! Connection settings for the remote setlist backend: the base URL that
//! the reverse proxy and the auth flows target, and the timeout applied to
//! every outbound call.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `BACKEND_API_URL` | Base URL of the backend API (including its path prefix) | `http://backend:8089/api` |
//! | `BACKEND_TIMEOUT_SECS` | Timeout for outbound backend calls, in seconds | `5` |

use crate::config::env::{read_string, read_u32};

/// Default backend base URL used in the docker-compose deployment.
pub const DEFAULT_BACKEND_URL: &str = "http://backend:8089/api";

/// Remote backend API settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    /// Base URL every proxied and internal backend call is joined onto.
    /// Stored without a trailing slash.
    pub base_url: String,
    /// Outbound call timeout in seconds. Applies to refresh, enrichment,
    /// auth actions and proxied requests alike.
    pub timeout_secs: u32,
}

impl ApiConfig {
    /// Loads backend settings from environment variables, falling back to
    /// the compose-network defaults.
    pub fn from_env() -> Self {
        let base_url = read_string("BACKEND_API_URL", DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string();
        ApiConfig {
            base_url,
            timeout_secs: read_u32("BACKEND_TIMEOUT_SECS", 5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_is_empty() {
        temp_env::with_vars(
            vec![
                ("BACKEND_API_URL", None::<&str>),
                ("BACKEND_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let cfg = ApiConfig::from_env();
                assert_eq!(cfg.base_url, DEFAULT_BACKEND_URL);
                assert_eq!(cfg.timeout_secs, 5);
            },
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        temp_env::with_vars(
            vec![("BACKEND_API_URL", Some("http://localhost:8089/api/"))],
            || {
                let cfg = ApiConfig::from_env();
                assert_eq!(cfg.base_url, "http://localhost:8089/api");
            },
        );
    }

    #[test]
    fn timeout_is_read_from_env() {
        temp_env::with_vars(vec![("BACKEND_TIMEOUT_SECS", Some("9"))], || {
            let cfg = ApiConfig::from_env();
            assert_eq!(cfg.timeout_secs, 9);
        });
    }
}
