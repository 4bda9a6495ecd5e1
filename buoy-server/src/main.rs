use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use buoy_server::config::ServerConfig;
use buoy_server::ndbc::NdbcClient;
use buoy_server::poller::StationRegistry;
use buoy_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let client = NdbcClient::new(config.ndbc.clone()).expect("Failed to create NDBC client");
    let registry = Arc::new(StationRegistry::new(client, config.poller.clone()));

    // Register configured stations concurrently; a bad station doesn't stop startup
    let results = join_all(config.stations.iter().map(|id| registry.register(id))).await;
    for (id, result) in config.stations.iter().zip(results) {
        match result {
            Ok(registration) => info!(station = %registration.station, "loaded station"),
            Err(e) => warn!(station = %id, code = e.code(), error = %e, "skipping station"),
        }
    }

    let app = create_router(AppState::new(Arc::clone(&registry)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!(
        addr = %config.bind_addr,
        stations = registry.len().await,
        interval_mins = config.poller.update_interval.as_secs() / 60,
        "NDBC buoy server listening"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %e, "server error");
    }

    registry.shutdown().await;
    info!("stopped");
}
