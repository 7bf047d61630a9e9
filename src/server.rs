//! HTTP server initialization and runtime setup.
//!
//! Handles the storage backend, worker spawning and the Axum server
//! lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::ClickTracker;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::{AppState, StorageKind};

/// Repositories selected at startup.
pub struct Storage {
    pub links: Arc<dyn LinkRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub kind: StorageKind,
}

impl Storage {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let pool = Arc::new(pool);
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            clicks: Arc::new(PgClickRepository::new(pool)),
            kind: StorageKind::Postgres,
        }
    }

    /// A fresh in-memory store serving both repositories.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            links: store.clone(),
            clicks: store,
            kind: StorageKind::Memory,
        }
    }
}

/// Opens the pool and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(pool)
}

/// Picks PostgreSQL when a database is configured, memory otherwise.
///
/// # Errors
///
/// Returns an error if a configured database cannot be used. There is no
/// silent fallback from a broken database to memory.
pub async fn open_storage(config: &Config) -> Result<Storage> {
    match config.database_url {
        Some(ref url) => Ok(Storage::postgres(connect_database(config, url).await?)),
        None => {
            tracing::warn!("No database configured, using in-memory storage (data is not persisted)");
            Ok(Storage::memory())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL with migrations, or in-memory)
/// - Background click worker
/// - Axum HTTP server, stopped by Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = open_storage(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let tracker = Arc::new(ClickTracker::new(storage.clicks.clone()));
    tokio::spawn(run_click_worker(click_rx, tracker));
    tracing::info!("Click worker started");

    let state = AppState::new(
        storage.links,
        storage.clicks,
        click_tx,
        config.base_url.clone(),
        storage.kind,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
