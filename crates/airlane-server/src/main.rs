//! Airlane Server - route feasibility quotes over HTTP

use std::net::SocketAddr;
use std::sync::Arc;

use airlane_server::{api, config::Config, state::AppState};
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // JSON logs for collectors, plain text otherwise
    let (json_layer, text_layer) = if config.log_json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };
    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("airlane_server=debug".parse()?))
        .init();

    tracing::info!("Starting Airlane Server...");

    let state = Arc::new(AppState::from_config(&config)?);
    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
