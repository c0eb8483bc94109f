//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the storage engines. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionRepository` - find / store / update / delete
//! - `SessionReader` - filtered, paginated listing
//!
//! ## Event Ports
//!
//! - `EventRepository` - append-only event storage
//!
//! ## Operational Ports
//!
//! - `StorageHealth` - backend reachability for health checks

mod event_repository;
mod session_reader;
mod session_repository;
mod storage_health;

pub use event_repository::EventRepository;
pub use session_reader::{ListOptions, SessionFilter, SessionReader};
pub use session_repository::{session_not_found, SessionRepository};
pub use storage_health::StorageHealth;
