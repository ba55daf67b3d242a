//! # Atrium POS Server
//!
//! Startup sequence: tracing, config, database + migrations, starter
//! catalog seeding, then the HTTP server with graceful shutdown.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use atrium_db::{seed_starter_catalog, Database, DbConfig};
use atrium_server::routes;
use atrium_server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Atrium POS server...");

    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite");

    let state = AppState::new(db);

    let seeded = seed_starter_catalog(state.store.as_ref()).await?;
    if seeded > 0 {
        info!(seeded, "Starter catalog seeded");
    }

    let app = routes::build_app(state.clone());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
