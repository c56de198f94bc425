use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use webhook_inspector::config::Config;
use webhook_inspector::{AppState, EventLog, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Also bridges the `log` records emitted by the library.
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let events = Arc::new(EventLog::new(config.capacity.get()));
    let state = AppState::new(events).with_max_body_bytes(config.max_body_bytes);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    let addr = listener.local_addr().context("failed to read listen address")?;

    log::info!(
        "webhook inspector listening on http://{addr}, retaining {} events",
        config.capacity
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
