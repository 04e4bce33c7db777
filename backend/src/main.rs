//! Main entry point for the account service.
//!
//! Initializes logging, loads configuration, builds the credential service
//! over the account store, and serves the router until Ctrl-C.

use std::sync::Arc;

use account_service::auth::CredentialService;
use account_service::config::Settings;
use account_service::database::MemoryStore;
use account_service::errors::AppError;
use account_service::{app, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (server, auth) = Settings::load()?.split()?;
    tracing::debug!(?auth, "authentication settings loaded");

    let credentials = CredentialService::new(Arc::new(MemoryStore::new()), &auth)?;
    let state = AppState::new(credentials);

    let addr = server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
