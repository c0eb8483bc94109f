//! Process wiring: storage selection, router assembly and serving.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::adapters::http::{build_router, SessionAppState};
use crate::adapters::memory::{InMemoryEventStore, InMemorySessionStore};
use crate::adapters::postgres::{
    connect_pool, run_migrations, PostgresEventRepository, PostgresHealth,
    PostgresSessionReader, PostgresSessionRepository,
};
use crate::application::{EventService, SessionService};
use crate::config::{AppConfig, DatabaseConfig, StorageBackend, ValidationError};
use crate::ports::{EventRepository, SessionReader, SessionRepository, StorageHealth};

/// Errors that stop the service from starting or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The port implementations selected by `database.backend`.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub reader: Arc<dyn SessionReader>,
    pub events: Arc<dyn EventRepository>,
    pub health: Arc<dyn StorageHealth>,
}

impl Storage {
    /// Process-local storage.
    pub fn in_memory() -> Self {
        let sessions = Arc::new(InMemorySessionStore::new());
        Self {
            sessions: sessions.clone(),
            reader: sessions.clone(),
            events: Arc::new(InMemoryEventStore::new()),
            health: sessions,
        }
    }

    /// Connect according to `config`, running migrations when asked to.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StartupError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let pool = connect_pool(config).await?;
                info!(
                    max_connections = config.max_connections,
                    "Connected to PostgreSQL"
                );
                if config.run_migrations {
                    run_migrations(&pool).await?;
                    info!("Database migrations applied");
                }
                Ok(Self {
                    sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
                    reader: Arc::new(PostgresSessionReader::new(pool.clone())),
                    events: Arc::new(PostgresEventRepository::new(pool.clone())),
                    health: Arc::new(PostgresHealth::new(pool)),
                })
            }
        }
    }
}

/// Build services over `storage` and mount every route.
pub fn build_app(config: &AppConfig, storage: Storage) -> Router {
    let timeout = config.database.operation_timeout();
    let sessions = SessionService::new(storage.sessions.clone(), storage.reader, timeout);
    let events = EventService::new(storage.events, storage.sessions, config.features, timeout);
    let state = SessionAppState::new(sessions, events, config.pagination);

    build_router(state, storage.health, &config.server)
}

/// Connect storage, bind, and serve until Ctrl+C.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let addr = config.server.socket_addr()?;
    let storage = Storage::connect(&config.database).await?;
    let app = build_app(&config, storage);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Session recorder listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
