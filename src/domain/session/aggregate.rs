//! Session aggregate entity.
//!
//! A session is one visitor's browsing visit recorded on behalf of one client.
//! Events reference sessions by ID; the session does not own them.

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, SessionId, Timestamp, ValidationError, VisitorId,
};
use serde::Serialize;

/// Largest `durationInSeconds` any storage backend can hold (signed 64-bit).
pub const MAX_DURATION_SECS: u64 = i64::MAX as u64;

/// Session aggregate.
///
/// # Invariants
///
/// - `id`, `client_id`, `visitor_id` and `created_at` never change
/// - `client_id` and `visitor_id` are never the nil id
/// - `last_event_time` is never before `created_at`
/// - `updated_at` is refreshed by every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    client_id: ClientId,
    visitor_id: VisitorId,
    last_event_time: Timestamp,
    duration_in_seconds: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// The only fields a caller may supply when creating a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCreationParams {
    client_id: ClientId,
    visitor_id: VisitorId,
}

impl SessionCreationParams {
    /// # Errors
    ///
    /// - `InvalidFormat` if either id is the nil id
    pub fn new(client_id: ClientId, visitor_id: VisitorId) -> Result<Self, ValidationError> {
        if client_id.is_nil() {
            return Err(ValidationError::invalid_format(
                ClientId::field_name(),
                "Invalid Client Id provided.",
            ));
        }
        if visitor_id.is_nil() {
            return Err(ValidationError::invalid_format(
                VisitorId::field_name(),
                "Invalid Visitor Id provided.",
            ));
        }
        Ok(Self {
            client_id,
            visitor_id,
        })
    }

    /// Parses both ids from their hex form.
    pub fn parse(client_id: &str, visitor_id: &str) -> Result<Self, ValidationError> {
        Self::new(ClientId::parse(client_id)?, VisitorId::parse(visitor_id)?)
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn visitor_id(&self) -> &VisitorId {
        &self.visitor_id
    }
}

/// The only fields a caller may change on an existing session.
///
/// `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionUpdateParams {
    pub last_event_time: Option<Timestamp>,
    pub duration_in_seconds: Option<u64>,
}

impl SessionUpdateParams {
    /// Returns true when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.last_event_time.is_none() && self.duration_in_seconds.is_none()
    }
}

impl Session {
    /// Create a new session at `now`.
    ///
    /// Duration starts at zero and `created_at == updated_at == last_event_time`.
    pub fn create(id: SessionId, params: SessionCreationParams, now: Timestamp) -> Self {
        Self {
            id,
            client_id: params.client_id,
            visitor_id: params.visitor_id,
            last_event_time: now,
            duration_in_seconds: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        client_id: ClientId,
        visitor_id: VisitorId,
        last_event_time: Timestamp,
        duration_in_seconds: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            visitor_id,
            last_event_time,
            duration_in_seconds,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn visitor_id(&self) -> &VisitorId {
        &self.visitor_id
    }

    /// Time of the most recent recorded event, or creation time if none.
    pub fn last_event_time(&self) -> &Timestamp {
        &self.last_event_time
    }

    pub fn duration_in_seconds(&self) -> u64 {
        self.duration_in_seconds
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the session belongs to the given client.
    pub fn belongs_to(&self, client_id: &ClientId) -> bool {
        &self.client_id == client_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply caller-supplied update parameters.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `last_event_time` precedes `created_at`
    /// - `OutOfRange` if `duration_in_seconds` exceeds [`MAX_DURATION_SECS`]
    pub fn apply_update(&mut self, params: SessionUpdateParams) -> Result<(), DomainError> {
        if let Some(last_event_time) = params.last_event_time {
            if last_event_time.is_before(&self.created_at) {
                return Err(DomainError::validation(
                    "lastEventTime",
                    "lastEventTime cannot be before the session's createdAt",
                ));
            }
        }
        if let Some(duration) = params.duration_in_seconds {
            if duration > MAX_DURATION_SECS {
                return Err(DomainError::new(
                    ErrorCode::OutOfRange,
                    format!("durationInSeconds must be at most {}", MAX_DURATION_SECS),
                )
                .with_detail("field", "durationInSeconds"));
            }
        }

        if let Some(last_event_time) = params.last_event_time {
            self.last_event_time = last_event_time;
        }
        if let Some(duration) = params.duration_in_seconds {
            self.duration_in_seconds = duration;
        }
        self.updated_at = Timestamp::now().max(self.updated_at);
        Ok(())
    }

    /// Record that an event happened at `at`.
    ///
    /// `last_event_time` only moves forward; duration is recomputed from it.
    /// Returns false when `at` is not newer than the current `last_event_time`.
    pub fn record_activity(&mut self, at: Timestamp) -> bool {
        if !at.is_after(&self.last_event_time) {
            return false;
        }
        self.last_event_time = at;
        self.duration_in_seconds = at.whole_seconds_since(&self.created_at);
        self.updated_at = Timestamp::now().max(at);
        true
    }
}
