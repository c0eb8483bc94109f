//! In-memory adapters.
//!
//! Used by tests and by the `memory` storage backend. Data lives only as long
//! as the process.

mod event_store;
mod session_store;

pub use event_store::InMemoryEventStore;
pub use session_store::InMemorySessionStore;
