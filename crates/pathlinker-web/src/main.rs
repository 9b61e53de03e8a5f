//! PathLinker Web Server
//!
//! Run with: cargo run -p pathlinker-web

use pathlinker_common::Config;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting PathLinker Web Server...");

    let config = Config::load()?;
    let addr: SocketAddr = config.server.bind.parse()?;

    // Create app state
    let state = pathlinker_web::state::AppState::from_config(config)?;

    // Build router
    let app = pathlinker_web::router::build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
