//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the recording domain.

mod errors;
mod ids;
mod object_id;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClientId, EventId, SessionId, VisitorId};
pub use object_id::{ObjectId, OBJECT_ID_BYTES, OBJECT_ID_HEX_LEN};
pub use timestamp::Timestamp;
