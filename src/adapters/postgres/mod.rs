//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSessionRepository` - Session find / store / update / delete
//! - `PostgresSessionReader` - Filtered, paginated session listing
//! - `PostgresEventRepository` - Append-only event storage
//! - `PostgresHealth` - Backend reachability

mod event_repository;
mod health;
mod pool;
mod session_reader;
mod session_repository;

pub use event_repository::PostgresEventRepository;
pub use health::PostgresHealth;
pub use pool::{connect_pool, run_migrations};
pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;
