//! Event record and its creation parameters.

use serde::Serialize;

use crate::domain::foundation::{EventId, SessionId, Timestamp, ValidationError};

/// Field name used in validation errors for the payload.
pub const DOM_EVENT_FIELD: &str = "domEvent";

/// A single recorded DOM interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: EventId,
    session_id: SessionId,
    dom_event: String,
    created_at: Timestamp,
}

/// Caller-supplied fields for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCreationParams {
    session_id: SessionId,
    dom_event: String,
}

impl EventCreationParams {
    /// # Errors
    ///
    /// - `EmptyField` if `dom_event` is empty or only whitespace
    pub fn new(session_id: SessionId, dom_event: impl Into<String>) -> Result<Self, ValidationError> {
        let dom_event = dom_event.into();
        if dom_event.trim().is_empty() {
            return Err(ValidationError::empty_field(DOM_EVENT_FIELD));
        }
        Ok(Self {
            session_id,
            dom_event,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn dom_event(&self) -> &str {
        &self.dom_event
    }
}

impl Event {
    /// Create a new event at `now`.
    pub fn create(id: EventId, params: EventCreationParams, now: Timestamp) -> Self {
        Self {
            id,
            session_id: params.session_id,
            dom_event: params.dom_event,
            created_at: now,
        }
    }

    /// Reconstitute an event from persistence (no validation).
    pub fn reconstitute(
        id: EventId,
        session_id: SessionId,
        dom_event: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            dom_event,
            created_at,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn dom_event(&self) -> &str {
        &self.dom_event
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_reject_empty_payload() {
        let result = EventCreationParams::new(SessionId::new(), "");
        assert_eq!(result, Err(ValidationError::empty_field("domEvent")));
    }

    #[test]
    fn params_reject_whitespace_payload() {
        assert!(EventCreationParams::new(SessionId::new(), "  \n\t").is_err());
    }

    #[test]
    fn create_copies_params() {
        let session_id = SessionId::new();
        let params = EventCreationParams::new(session_id, r#"{"type":"click"}"#).unwrap();
        let now = Timestamp::now();
        let event = Event::create(EventId::new(), params, now);

        assert_eq!(event.session_id(), &session_id);
        assert_eq!(event.dom_event(), r#"{"type":"click"}"#);
        assert_eq!(event.created_at(), &now);
    }

    #[test]
    fn payload_is_kept_verbatim() {
        let params = EventCreationParams::new(SessionId::new(), "  click  ").unwrap();
        assert_eq!(params.dom_event(), "  click  ");
    }
}
