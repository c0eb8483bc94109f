//! Session domain module.
//!
//! A session tracks one visitor's visit on behalf of one client: when it
//! started, when the last event arrived, and how long it has lasted.

mod aggregate;
mod errors;

pub use aggregate::{Session, SessionCreationParams, SessionUpdateParams, MAX_DURATION_SECS};
pub use errors::SessionError;
