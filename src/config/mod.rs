//! Application configuration: environment loading and typed sub-configs.

pub mod api;
pub mod app;
pub mod env;
pub mod session;
pub mod web;

pub use api::ApiConfig;
pub use app::AppConfig;
pub use session::SessionConfig;
pub use web::HttpConfig;
