//! sharenv - shared shell environment server
//!
//! Serves a directory of variable files and an alias file as shell
//! statements for `eval $(curl -s $SHARENV_ENDPOINT)`.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sharenv::api::create_router;
use sharenv::{spawn_watcher, AppState, Config, SecretToken, WatchPaths};

/// Main entry point for the sharenv server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Resolve the secret token
/// 4. Create the variable store and the variables directory
/// 5. Start the file watcher task
/// 6. Start HTTP server on the configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sharenv=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sharenv server");

    let config = Config::from_env();
    let token = SecretToken::from_config(config.token.as_deref());
    info!(
        "Configuration loaded: cache_ttl={}s, rotation_interval={}s",
        config.cache_ttl, config.rotation_interval
    );
    info!("Vars directory: {}", config.vars_dir.display());
    info!("Aliases file: {}", config.aliases_file.display());

    if let Err(e) = std::fs::create_dir_all(&config.vars_dir) {
        warn!(
            "Could not create vars directory {}: {}",
            config.vars_dir.display(),
            e
        );
    }

    let state = AppState::from_config(&config, token);

    // The watcher only speeds up invalidation; hash checks keep reads correct without it.
    let watch = WatchPaths::resolve(&config.vars_dir, &config.aliases_file)
        .and_then(|paths| spawn_watcher(state.store.clone(), paths));
    let (_watcher, watcher_handle) = match watch {
        Ok((watcher, handle)) => (Some(watcher), Some(handle)),
        Err(e) => {
            warn!("File watcher disabled: {}", e);
            (None, None)
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Starting sharenv server on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(watcher_handle))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the watcher task.
async fn shutdown_signal(watcher_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = watcher_handle {
        handle.abort();
        warn!("File watcher task aborted");
    }
}
