//! HTTP DTOs for session and event endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::event::Event;
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::domain::session::{Session, SessionUpdateParams};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
///
/// Missing fields deserialize as empty strings so they are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub visitor_id: String,
}

/// Request to change a session's mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub last_event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_in_seconds: Option<u64>,
}

impl From<UpdateSessionRequest> for SessionUpdateParams {
    fn from(req: UpdateSessionRequest) -> Self {
        Self {
            last_event_time: req.last_event_time.map(Timestamp::from_datetime),
            duration_in_seconds: req.duration_in_seconds,
        }
    }
}

/// Request to append an event to a session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub dom_event: String,
}

/// Query parameters for listing sessions.
///
/// Pagination values stay raw strings; `validation` parses them so a bad
/// value yields this API's error body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsQuery {
    pub client_id: Option<String>,
    pub visitor_id: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for listing a session's events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub client_id: String,
    pub visitor_id: String,
    pub last_event_time: String,
    pub duration_in_seconds: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            client_id: session.client_id().to_string(),
            visitor_id: session.visitor_id().to_string(),
            last_event_time: session.last_event_time().to_rfc3339(),
            duration_in_seconds: session.duration_in_seconds(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub session_id: String,
    pub dom_event: String,
    pub created_at: String,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().to_string(),
            session_id: event.session_id().to_string(),
            dom_event: event.dom_event().to_string(),
            created_at: event.created_at().to_rfc3339(),
        }
    }
}

/// Standard error body: `{"error": ..., "code": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }
}
