//! # Application Configuration Loader
//!
//! Unified configuration loader for the front-end server: backend API
//! connection, HTTP listener and session cookie policy.
//!
//! Automatically loads `.env` files for non-production environments. It
//! checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! The configuration is initialized once at startup and shared read-only
//! through the application state; nothing mutates it at runtime.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `BACKEND_API_URL` | Backend API base URL | `http://backend:8089/api` |
//! | `BACKEND_TIMEOUT_SECS` | Outbound call timeout (seconds) | `5` |
//! | `LISTEN_ADDR` | Server bind address | `0.0.0.0:3000` |
//! | `SESSION_COOKIE_SECURE` | `Secure` flag on session cookies | `true` in production |
//!
//! # Example
//! ```rust,no_run
//! use setlist_web::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env();
//! println!("proxying to {}", cfg.api.base_url);
//! ```

use std::env;

use crate::config::{api::ApiConfig, session::SessionConfig, web::HttpConfig};

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Current environment name (`development`, `production`, ...).
    pub app_env: String,
    /// Remote backend API settings.
    pub api: ApiConfig,
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Session cookie policy.
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Parses all supported environment variables and falls back to
    ///   defaults.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        let session = SessionConfig::from_env(&app_env);

        AppConfig {
            app_env,
            api: ApiConfig::from_env(),
            http: HttpConfig::from_env(),
            session,
        }
    }

    /// Returns `true` when running with `APP_ENV=production`.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_includes_api_config() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("production")),
                ("BACKEND_API_URL", Some("http://api.internal/api")),
            ],
            || {
                let cfg = AppConfig::from_env();
                assert_eq!(cfg.api.base_url, "http://api.internal/api");
                assert!(cfg.is_production());
            },
        );
    }

    #[test]
    fn production_enables_secure_cookies() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("production")),
                ("SESSION_COOKIE_SECURE", None::<&str>),
            ],
            || {
                let cfg = AppConfig::from_env();
                assert!(cfg.session.cookie_secure);
            },
        );
    }

    #[test]
    fn development_defaults_to_insecure_cookies() {
        temp_env::with_vars(
            vec![
                ("APP_ENV", Some("development")),
                ("SESSION_COOKIE_SECURE", None::<&str>),
                ("DOTENV_FILE", Some("/nonexistent/.env")),
            ],
            || {
                let cfg = AppConfig::from_env();
                assert!(!cfg.session.cookie_secure);
                assert!(!cfg.is_production());
            },
        );
    }
}
