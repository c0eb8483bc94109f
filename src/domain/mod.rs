//! Domain layer containing the recording model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors)
//! - `session` - Session aggregate and its creation/update parameters
//! - `event` - Append-only DOM event records

pub mod event;
pub mod foundation;
pub mod session;
