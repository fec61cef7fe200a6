//! Chat Shim - Main entry point
//!
//! This binary creates and runs the HTTP server with all configured routes and
//! middleware. Configuration comes from environment variables (see [`chat_shim`]).

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use chat_shim::{
    api::{chat_completions, health, list_models, AppState},
    core::AppConfig,
    HttpBackend,
};
use chrono::Local;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Custom time formatter that uses local timezone (respects TZ environment variable)
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    // Always suppress noisy HTTP library logs regardless of RUST_LOG setting
    let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,chat_shim=debug".to_string());
    let filter_str = format!("{},hyper=warn,h2=warn,reqwest=warn", base_filter);
    let filter = tracing_subscriber::EnvFilter::new(filter_str);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime))
        .init();

    let config = AppConfig::from_env()?;
    let port = config.server.port;

    let http_client = create_http_client(&config);
    let backend = Arc::new(HttpBackend::new(http_client, config.backend_url.clone()));
    let registry = chat_shim::ModelRegistry::from_config(&config);

    tracing::info!(
        backend_url = %config.backend_url,
        models = config.models.len(),
        "Configuration loaded"
    );

    let state = Arc::new(AppState {
        config,
        registry,
        backend,
    });

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting chat shim on {}", addr);
    tracing::info!("OpenAI API: /v1/chat/completions, /models");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build router with all endpoints
fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/models", get(list_models))
        .route("/v1/models", get(list_models))
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Create HTTP client for backend calls.
///
/// The client-level timeout is the per-call bound on backend requests.
fn create_http_client(config: &AppConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.backend_timeout_secs))
        .pool_max_idle_per_host(100)
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .build()
        .expect("Failed to build HTTP client")
}
