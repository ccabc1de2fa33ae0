use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use setlist_web::api::HttpBackendApi;
use setlist_web::config::AppConfig;
use setlist_web::time::SystemClock;
use setlist_web::web::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let listen_addr = config.http.listen_addr.clone();

    let api = HttpBackendApi::new(&config.api).context("building backend API client")?;
    let state = AppState {
        http: api.http_client(),
        config: Arc::new(config),
        api: Arc::new(api),
        clock: Arc::new(SystemClock),
    };

    tracing::info!(
        backend = %state.config.api.base_url,
        env = %state.config.app_env,
        "proxying API calls"
    );

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(%listen_addr, "setlist front end listening");

    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}
