use std::net::SocketAddr;
use std::time::Duration;
use tracing::{error, info};

use vote_api::{build_router, AppState};
use vote_shared::config::{AppConfig, SessionStrategy};
use vote_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_telemetry(&config.log)?;

    info!(
        "{} starting (env={}, session strategy={})",
        config.app.name,
        config.app.env,
        config.session.strategy.as_str()
    );

    let state = match AppState::in_memory(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build application state: {}", e);
            std::process::exit(1);
        }
    };

    // Token mode sweeps on login; cookie mode relies on the periodic sweeper
    let sweeper = (config.session.strategy == SessionStrategy::Cookie).then(|| {
        let period = Duration::from_secs(config.session.sweep_interval_secs);
        info!("Session sweeper every {}s", period.as_secs());
        tokio::spawn(state.sessions.clone().run_sweeper(period))
    });

    let app = build_router(state);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = sweeper {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
