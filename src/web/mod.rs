//! HTTP surface: the session interceptor, the reverse proxy, page
//! rendering and the router.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::config::AppConfig;
use crate::time::Clock;

pub mod context;
pub mod interceptor;
pub mod pages;
pub mod proxy;
pub mod routes;

pub use context::RequestContext;
pub use routes::build_router;

/// Shared application state, assembled once at startup.
///
/// Everything here is immutable after construction; per-request state
/// lives in [`RequestContext`].
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn BackendApi>,
    pub clock: Arc<dyn Clock>,
    /// Shared outbound HTTP client used by the reverse proxy.
    pub http: reqwest::Client,
}
