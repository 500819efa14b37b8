//! Abfahrt gateway binary.

use std::sync::Arc;

use abfahrt_core::StationDirectory;
use abfahrt_gateway::{create_router, AppState, Args, ChangeWatcher, GatewayConfig};
use abfahrt_store::Store;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abfahrt_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.listen_addr,
        redis = %config.store.url,
        stream = %config.store.stream_key,
        "starting abfahrt gateway"
    );

    let stations = Arc::new(load_stations(&config)?);
    info!(stations = stations.len(), "station directory loaded");

    let store = Store::connect(config.store.clone())
        .await
        .context("connecting to Redis")?;
    info!("connected to store");

    // Process-wide shutdown signal, shared by the watcher and the server.
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    let shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            return;
        }
        info!("received shutdown signal");
        let _ = shutdown.send(());
    });

    // The watcher runs for the process lifetime, independent of any session.
    let watcher = ChangeWatcher::new(store.clone(), stations);
    let watcher_shutdown = shutdown_tx.subscribe();
    tokio::spawn(async move {
        if let Err(e) = watcher.run(watcher_shutdown).await {
            tracing::error!(error = %e, "change watcher stopped");
        }
    });

    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!("gateway listening on {}", config.listen_addr);

    let mut server_shutdown = shutdown_tx.subscribe();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_shutdown.recv().await;
        })
        .await?;

    info!("gateway shutdown complete");
    Ok(())
}

/// Load the station directory from `--stations` or fall back to the
/// compiled-in table.
fn load_stations(config: &GatewayConfig) -> anyhow::Result<StationDirectory> {
    match &config.stations_path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening stations file {}", path.display()))?;
            StationDirectory::from_reader(std::io::BufReader::new(file))
                .with_context(|| format!("parsing stations file {}", path.display()))
        }
        None => Ok(StationDirectory::default()),
    }
}
