use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use catalog_api::{create_router, logging, AppState, Dependencies, ServerError, Settings};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenv().ok();

    let settings = Settings::from_env()?;
    logging::init(settings.log_format)?;

    info!(listen_addr = %settings.listen_addr, "Starting catalog API");

    let dependencies = Dependencies::new(&settings).await?;
    let app = create_router(AppState::new(dependencies.search));

    let listener = TcpListener::bind(settings.listen_addr).await?;
    info!(listen_addr = %settings.listen_addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server terminated unexpectedly");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!(error = %e, "Failed to install SIGTERM handler");
            wait_for_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("SIGINT received, shutting down"),
        _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal source the server runs until killed
            error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    }
}
