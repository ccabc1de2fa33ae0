//! # HTTP Server Configuration
//!
//! Listener address and HTTP-layer limits for the front-end server.

use crate::config::env::{read_string, read_u32};

/// HTTP-related configuration.
///
/// # Example
/// ```rust
/// use setlist_web::config::web::HttpConfig;
///
/// let cfg = HttpConfig {
///     listen_addr: "0.0.0.0:3000".into(),
///     max_body_bytes: 5 * 1024 * 1024,
/// };
/// assert!(cfg.max_body_bytes > 1_000_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpConfig {
    /// Address the server binds to.
    pub listen_addr: String,
    /// Upper bound on buffered request bodies (forms and proxied uploads).
    pub max_body_bytes: usize,
}

impl HttpConfig {
    /// Loads HTTP settings from `LISTEN_ADDR` and `HTTP_MAX_BODY_MB` /
    /// `HTTP_MAX_BODY_BYTES` (bytes take precedence when both are set).
    pub fn from_env() -> Self {
        let max_body_bytes = std::env::var("HTTP_MAX_BODY_BYTES")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or_else(|| (read_u32("HTTP_MAX_BODY_MB", 5) as usize) * 1024 * 1024);

        HttpConfig {
            listen_addr: read_string("LISTEN_ADDR", "0.0.0.0:3000"),
            max_body_bytes,
        }
    }
}
