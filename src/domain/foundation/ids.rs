//! Strongly-typed identifier value objects.
//!
//! Every identifier wraps an [`ObjectId`]; the wrappers only exist so that a
//! client id can never be passed where a session id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ObjectId, ValidationError};

/// Declares an `ObjectId`-backed identifier type.
///
/// `$field` is the JSON field name reported in validation errors.
macro_rules! object_id_type {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(ObjectId);

        impl $name {
            /// Generates a new unique identifier.
            pub fn new() -> Self {
                Self(ObjectId::new())
            }

            /// Wraps an existing object id.
            pub fn from_object_id(id: ObjectId) -> Self {
                Self(id)
            }

            /// Returns the inner object id.
            pub fn as_object_id(&self) -> &ObjectId {
                &self.0
            }

            /// Parses the hex form, reporting errors against this id's field name.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                ObjectId::parse_field(s, $field).map(Self)
            }

            /// JSON field name used in validation errors.
            pub const fn field_name() -> &'static str {
                $field
            }

            /// Returns true for the all-zero id.
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

object_id_type!(
    /// Unique identifier for a recorded session.
    SessionId,
    "sessionId"
);

object_id_type!(
    /// Unique identifier for a recorded DOM event.
    EventId,
    "eventId"
);

object_id_type!(
    /// Identifier of the client (tenant) that owns sessions.
    ClientId,
    "clientId"
);

object_id_type!(
    /// Identifier of the visitor a session was recorded for.
    VisitorId,
    "visitorId"
);
