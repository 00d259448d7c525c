//! itemkv - Local Hosting Runtime
//!
//! This is the main entry point for the itemkv server.
//! It loads the configuration, builds the store once, and serves the
//! create/get/delete handlers over HTTP.

use itemkv::config::Config;
use itemkv::server::{serve, AppState};
use itemkv::storage::MemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_banner(config: &Config) {
    println!(
        r#"
itemkv v{} - Item Handlers over a Key-Value Table
──────────────────────────────────────────────────
Table:   {}
Server:  http://{}

  POST   /items          create an item
  GET    /items/{{id}}     fetch an item
  DELETE /items/{{id}}     delete an item

Use Ctrl+C to shutdown gracefully.
"#,
        itemkv::VERSION,
        config.table_name,
        config.bind_address()
    );
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments and environment
    let config = Config::load()?;

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    print_banner(&config);

    // One store per process, shared by every invocation
    let store = Arc::new(MemoryStore::with_table(&config.table_name));
    info!(table = %config.table_name, "Storage initialized");

    let state = AppState::new(Arc::clone(&store), &config.table_name);
    let stats = Arc::clone(&state.stats);

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", config.bind_address());

    serve(listener, state, shutdown_signal()).await?;

    let storage = store.stats();
    info!(
        invocations = stats.invocations(),
        client_errors = stats.client_errors(),
        server_errors = stats.server_errors(),
        items = storage.keys,
        "Server shutdown complete"
    );
    Ok(())
}
