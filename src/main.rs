// Draftroom backend entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config (copying defaults on first run)
// 3. Build the HTTP fetcher and player aggregator
// 4. Build in-memory stores and application state
// 5. Spawn the WebSocket relay task
// 6. Serve the HTTP API until ctrl-c

use draftroom_backend::config;
use draftroom_backend::fetch::HttpFetcher;
use draftroom_backend::http::{build_router, AppState};
use draftroom_backend::players::Aggregator;
use draftroom_backend::ws_server::{self, Rooms};

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Draftroom backend starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: listening on {}:{}, ws port {}, cache TTL {}s",
        config.host, config.port, config.ws_port, config.players_ttl_secs
    );

    let fetcher = Arc::new(
        HttpFetcher::new(Duration::from_secs(config.providers.timeout_secs))
            .context("failed to build HTTP client")?,
    );
    let aggregator = Arc::new(Aggregator::new(
        fetcher,
        config.providers.clone(),
        Duration::from_secs(config.players_ttl_secs),
    ));

    let state = AppState::new(aggregator);
    let app = build_router(state, &config);

    // WebSocket relay runs beside the HTTP server on its own port.
    let ws_port = config.ws_port;
    let ws_handle = tokio::spawn(async move {
        if let Err(e) = ws_server::run(ws_port, Rooms::new()).await {
            error!("WebSocket relay error: {e}");
        }
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP server on {addr}"))?;
    info!("HTTP API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    // The relay loops forever; stop it once the HTTP server is down.
    ws_handle.abort();

    info!("Draftroom backend shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    } else {
        info!("Shutting down...");
    }
}

/// Initialize tracing to stderr with an env-filter override.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draftroom_backend=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
