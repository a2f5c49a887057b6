//! Email Domain Screening API Server
//!
//! Serves domain classification, company-domain candidates and Google
//! Workspace probes over HTTP, built with axum and tokio.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_handler;
mod config;
mod routes;
mod state;

use config::{load_config, AppConfig, CONFIG_FILE};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(CONFIG_FILE).context("Failed to load configuration")?;

    init_tracing(&config);

    info!("Starting Email Domain Screening API v{}", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config)?;

    let stats = app_state.classifier.lists().stats();
    info!(
        "Lists loaded - {} disposable domains, {} free domains, {} bad words",
        stats.disposable_domains, stats.free_domains, stats.bad_words
    );

    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on {}", addr);
    info!("Health check available at http://{}/health", addr);
    info!("Candidate API: http://{}/v1/domains", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    routes::build_routes(Arc::new(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET])
                .allow_headers(tower_http::cors::Any),
        )
        .layer(CompressionLayer::new())
}

/// Initialize tracing and logging
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.observability.log_level.clone().into());

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
