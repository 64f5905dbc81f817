//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, the Axum server lifecycle and graceful shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::ShortUrlStore;
use crate::domain::slug::SlugAllocator;
use crate::infrastructure::persistence::{InMemoryShortUrlStore, PgShortUrlStore, pg_store};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
#[cfg(unix)]
use tokio::signal::unix::SignalKind;
use tower_http::normalize_path::NormalizePath;
use tracing::{error, info};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured short URL store (PostgreSQL pool and migrations if selected)
/// - Axum HTTP server
///
/// Returns once a termination signal has been received and in-flight
/// requests have drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - In-flight requests outlive the shutdown grace period
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let state = AppState::new(store, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server up, listening on http://{addr}");

    serve_with_grace(listener, app, shutdown_signal(), config.shutdown_grace()).await?;

    info!("Server shut down");
    Ok(())
}

/// Creates the store selected by [`Config::storage`].
///
/// # Errors
///
/// Returns an error if slug settings are out of range or the database is
/// unreachable.
pub async fn build_store(config: &Config) -> Result<Arc<dyn ShortUrlStore>> {
    let allocator = SlugAllocator::random(config.slug_length, config.slug_max_attempts)?;

    let store: Arc<dyn ShortUrlStore> = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Arc::new(InMemoryShortUrlStore::with_allocator(allocator))
        }
        StorageBackend::Postgres => {
            let pool = pg_store::connect(&config.pg_settings()?)
                .await
                .context("Failed to connect to database")?;
            info!("Connected to database");
            Arc::new(PgShortUrlStore::new(Arc::new(pool), allocator))
        }
    };

    Ok(store)
}

/// Serves `app` until `shutdown` resolves, then gives in-flight requests
/// `grace` to finish.
///
/// New connections are refused as soon as `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails or requests are still running when
/// the grace period ends.
pub async fn serve_with_grace<F>(
    listener: TcpListener,
    app: NormalizePath<Router>,
    shutdown: F,
    grace: Duration,
) -> Result<()>
where
    F: Future<Output = &'static str> + Send + 'static,
{
    let (draining_tx, mut draining_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move {
            let signal = shutdown.await;
            info!(signal, "Shutting down, draining in-flight requests");
            let _ = draining_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.context("Server error"),
        Ok(()) = &mut draining_rx => {}
    }

    tokio::select! {
        result = &mut server => result.context("Server error"),
        _ = tokio::time::sleep(grace) => {
            error!(grace_secs = grace.as_secs_f64(), "Shutdown deadline exceeded");
            anyhow::bail!("In-flight requests did not finish within {:?}", grace)
        }
    }
}

/// Resolves with the name of the first termination signal received.
///
/// Listens for SIGINT everywhere and additionally SIGTERM and SIGQUIT on Unix.
pub async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = wait_for_unix_signal(SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let quit = wait_for_unix_signal(SignalKind::quit(), "SIGQUIT");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let quit = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
        _ = quit => "SIGQUIT",
    }
}

#[cfg(unix)]
async fn wait_for_unix_signal(kind: SignalKind, name: &'static str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!(error = %e, signal = name, "Failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}
