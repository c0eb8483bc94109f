//! Event domain module.
//!
//! Events are append-only records of a single DOM interaction within a
//! session. They are never updated or deleted through this service.

mod record;

pub use record::{Event, EventCreationParams};
