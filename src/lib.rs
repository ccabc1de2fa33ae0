//! # setlist_web
//!
//! Server-rendered front end for the band setlist-management application.
//!
//! The crate is organized around the per-request session protocol:
//! every inbound request passes through the session interceptor
//! (`web::interceptor`), which reads the cookie-held session
//! (`session`), structurally decodes the access token (`auth::token`),
//! refreshes it through the backend when needed (`api`), and enriches
//! the result into a [`web::RequestContext`] for the page handlers and
//! the `/api` reverse proxy (`web::proxy`).
//!
//! ## Example usage (composition root)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use setlist_web::api::HttpBackendApi;
//! use setlist_web::config::AppConfig;
//! use setlist_web::time::SystemClock;
//! use setlist_web::web::{AppState, build_router};
//!
//! let config = AppConfig::from_env();
//! let api = HttpBackendApi::new(&config.api).unwrap();
//! let state = AppState {
//!     http: api.http_client(),
//!     config: Arc::new(config),
//!     api: Arc::new(api),
//!     clock: Arc::new(SystemClock),
//! };
//! let app = build_router(state);
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use askama;
pub use axum;
pub use axum_extra;
pub use chrono;
pub use dotenvy;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;

// ===============================
// Public modules
// ===============================
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod time;
pub mod web;
