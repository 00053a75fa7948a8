// ccache-exporter - Prometheus exporter for ccache metrics

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::info;

use ccache_exporter::ccache::{LocalCommand, Wrapper};
use ccache_exporter::cli::Args;
use ccache_exporter::config::AppConfig;
use ccache_exporter::server::create_router;
use ccache_exporter::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting ccache-exporter v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Probe the ccache binary and detect its version
    let command = LocalCommand::new(&config.ccache.binary_path)?;
    let wrapper = Wrapper::new(Box::new(command))?;
    info!(
        ccache_binary = %config.ccache.binary_path,
        ccache_version = %wrapper.version(),
        "ccache: command wrapper created"
    );

    // Phase 4: Build and start HTTP server
    let app = create_router(wrapper)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
