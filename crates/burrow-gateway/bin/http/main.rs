mod cli;

use std::sync::Arc;

use anyhow::Context;
use burrow_core::{DurableStore, Shortener, SystemClock};
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_shortener::{StoreSettings, UrlStore};
use burrow_storage::{InMemoryStore, SqliteStore};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogFormatArg, StorageBackendArg};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        "starting burrow gateway"
    );

    let generator = RandomGenerator::builder()
        .length(usize::from(config.code_length))
        .build();
    let settings = StoreSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    let shortener: Arc<dyn Shortener> = match config.storage {
        StorageBackendArg::InMemory => {
            Arc::new(load_store(InMemoryStore::new(), generator, settings).await?)
        }
        StorageBackendArg::Sqlite => {
            let durable = SqliteStore::connect(&config.database_url)
                .await
                .with_context(|| format!("failed to open {}", config.database_url))?;
            durable
                .migrate()
                .await
                .context("failed to apply sqlite schema")?;
            Arc::new(load_store(durable, generator, settings).await?)
        }
    };

    let app = App::router(AppState::new(shortener, config.public_base_url));

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("gateway stopped");
    Ok(())
}

async fn load_store<D: DurableStore>(
    durable: D,
    generator: RandomGenerator,
    settings: StoreSettings,
) -> anyhow::Result<UrlStore<D, RandomGenerator>> {
    let store = UrlStore::initialize_with(durable, generator, SystemClock, settings)
        .await
        .context("refusing to serve without a loaded url cache")?;
    info!(records = store.len().await, "url cache loaded");
    Ok(store)
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
