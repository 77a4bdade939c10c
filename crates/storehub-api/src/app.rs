//! Application builder: wires state, router, and middleware, and runs the
//! server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use storehub_core::config::AppConfig;
use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_database::RepositoryProvider;
use storehub_service::build_catalog;

use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::{AppState, ShutdownSignal};

/// Connect the backing store and register the catalog services.
pub async fn build_state(config: AppConfig, shutdown: ShutdownSignal) -> AppResult<AppState> {
    info!(provider = %config.database.provider, "Initializing backing store");
    let provider = RepositoryProvider::from_config(&config.database).await?;
    let services = build_catalog(&provider)?;

    Ok(AppState {
        config: Arc::new(config),
        provider,
        services: Arc::new(services),
        shutdown,
        started_at: Instant::now(),
    })
}

/// Build the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> AppResult<Router> {
    let max_body = state.config.server.max_body_bytes;

    Ok(build_router(state)?.layer(
        ServiceBuilder::new()
            .layer(axum_middleware::from_fn(request_logging))
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(max_body)),
    ))
}

/// Run the StoreHub server until Ctrl+C or SIGTERM.
///
/// On a shutdown signal the listener stops accepting connections and
/// in-flight requests get `shutdown_grace_seconds` to finish before their
/// cancellation tokens fire.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting StoreHub server...");

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let shutdown = ShutdownSignal::new();
    let state = build_state(config, shutdown.clone()).await?;
    let provider = state.provider.clone();
    let app = build_app(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("StoreHub server listening on {}", addr);

    let signal = {
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal(&shutdown).await;
            info!(grace_seconds = grace.as_secs(), "Shutting down");
            tokio::spawn(async move {
                tokio::time::sleep(grace).await;
                shutdown.trigger();
            });
        }
    };

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    shutdown.trigger();
    provider.close().await;
    info!("StoreHub server stopped");
    result
}

async fn wait_for_signal(shutdown: &ShutdownSignal) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.triggered() => {},
    }
}
