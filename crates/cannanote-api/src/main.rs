// CannaNote server
// Decision: Run on PostgreSQL when DATABASE_URL is set, otherwise in-memory dev mode
// Decision: Drain in-flight requests on Ctrl+C / SIGTERM, then close the pool

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use cannanote_api::{app, config::AppConfig, AppState};
use cannanote_storage::StorageBackend;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG: Log filter (default: "cannanote_api=debug,tower_http=debug")
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cannanote_api=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("cannanote-api starting...");

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let backend = match &config.database_url {
        Some(url) => {
            let backend = StorageBackend::postgres(url, config.run_migrations)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            backend
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running in dev mode with in-memory storage");
            StorageBackend::in_memory()
        }
    };

    let state = AppState::new(&backend, &config).context("Failed to build app state")?;
    let app = app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!(storage = backend.name(), "HTTP server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    backend.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
