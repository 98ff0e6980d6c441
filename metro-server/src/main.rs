use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::booking::BookingService;
use metro_server::config::ServerConfig;
use metro_server::network::{ConfigError, Network, demo_network};
use metro_server::ticket::TicketIssuer;
use metro_server::web::{AppState, create_router};

/// Load the configured network, or the demo network when none is set.
fn load_network(config: &ServerConfig) -> Result<Network, ConfigError> {
    match &config.network_file {
        Some(path) => {
            info!(path = %path.display(), "Loading network definition");
            Network::from_file(path)
        }
        None => {
            info!("No METRO_NETWORK_FILE set, using demo network");
            demo_network()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // A bad network is fatal: never serve a partially valid graph
    let network = match load_network(&config) {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "Failed to load network");
            return ExitCode::FAILURE;
        }
    };
    info!(
        stations = network.station_count(),
        segments = network.segment_count(),
        policy = %config.policy,
        "Network loaded"
    );

    let booking = BookingService::new(
        Arc::new(network),
        config.planner(),
        TicketIssuer::new(config.issuer()),
    );
    let app = create_router(AppState::new(booking));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "Metro booking service listening");
    info!("  GET  /health    - Health check");
    info!("  GET  /stations  - Station catalog");
    info!("  POST /bookings  - Plan a route and issue a ticket");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down");
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
