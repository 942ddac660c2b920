// Server startup and initialization logic

use crate::server::{Server, ServerConfig};
use crate::store::MemoryStore;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for server startup
pub struct StartupConfig {
    pub host: String,
    pub port: u16,
    /// Optional JSON seed file (an array of record field objects).
    pub data: Option<PathBuf>,
    pub verbose: bool,
}

/// Build the store (optionally seeded), bind, and serve until Ctrl+C.
pub async fn start_server(config: StartupConfig) -> Result<()> {
    let store = match &config.data {
        Some(path) => MemoryStore::load_seed(path)
            .with_context(|| format!("Failed to load seed data from {}", path.display()))?,
        None => MemoryStore::new(),
    };
    let store = Arc::new(store);

    let server_config = ServerConfig {
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let server = Server::new(store.clone(), server_config);
    let app = server.router();

    let addr = format!("{}:{}", config.host, config.port);
    let socket_addr: SocketAddr = addr.parse().context("Invalid address format")?;
    let listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .context("Failed to bind to address")?;

    display_server_info(&addr, store.len(), &config);
    eprintln!("\nPress Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("[Server] shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("[Server] failed to install Ctrl+C handler: {}", e);
    }
}

/// Display server startup information
fn display_server_info(addr: &str, record_count: usize, config: &StartupConfig) {
    eprintln!("rostergrid HTTP server started");
    eprintln!("  Listening: http://{}", addr);
    match &config.data {
        Some(path) => eprintln!("  Seed data: {} ({} records)", path.display(), record_count),
        None => eprintln!("  Seed data: none (empty store)"),
    }
    if config.verbose {
        log::debug!("[Server] verbose logging enabled");
    }
}
