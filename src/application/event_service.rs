//! EventService - appends DOM events and keeps their session's activity current.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::FeatureFlags;
use crate::domain::event::{Event, EventCreationParams};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::{EventRepository, ListOptions, SessionRepository};

use super::timeout::bounded;

/// Service over the event repository.
///
/// Two policies from [`FeatureFlags`] shape `append`:
/// - `enforce_session_exists`: unknown sessions are rejected with `NotFound`
/// - `track_session_activity`: the session's `lastEventTime` and duration
///   follow the newest event through the repository's atomic
///   `record_activity`; a failure there is logged, not returned
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    sessions: Arc<dyn SessionRepository>,
    flags: FeatureFlags,
    operation_timeout: Duration,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        sessions: Arc<dyn SessionRepository>,
        flags: FeatureFlags,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            events,
            sessions,
            flags,
            operation_timeout,
        }
    }

    /// Append an event to a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is unknown and existence is enforced
    /// - `Timeout` / `Infrastructure` on storage failure
    pub async fn append(&self, params: &EventCreationParams) -> Result<Event, SessionError> {
        let session_id = params.session_id();

        if self.flags.enforce_session_exists && !self.session_exists(session_id).await? {
            warn!(session_id = %session_id, "Rejected event for unknown session");
            return Err(SessionError::not_found(session_id));
        }

        let event = bounded(self.operation_timeout, "append_event", self.events.append(params))
            .await?;
        info!(event_id = %event.id(), session_id = %session_id, "Event recorded");

        if self.flags.track_session_activity {
            self.track_activity(&event).await;
        }

        Ok(event)
    }

    /// List a session's events, oldest first.
    pub async fn list_by_session(
        &self,
        session_id: &SessionId,
        options: &ListOptions,
    ) -> Result<Vec<Event>, SessionError> {
        debug!(
            session_id = %session_id,
            offset = options.offset,
            limit = options.limit,
            "Listing events"
        );
        if options.is_empty() {
            return Ok(Vec::new());
        }
        Ok(bounded(
            self.operation_timeout,
            "list_events",
            self.events.list_by_session(session_id, options),
        )
        .await?)
    }

    async fn session_exists(&self, id: &SessionId) -> Result<bool, SessionError> {
        Ok(bounded(self.operation_timeout, "session_exists", self.sessions.exists(id)).await?)
    }

    async fn track_activity(&self, event: &Event) {
        let session_id = event.session_id();
        let result = bounded(
            self.operation_timeout,
            "record_activity",
            self.sessions.record_activity(session_id, *event.created_at()),
        )
        .await;
        match result {
            Ok(true) => debug!(session_id = %session_id, "Session activity recorded"),
            Ok(false) => debug!(session_id = %session_id, "Session already has newer activity"),
            Err(err) if err.is_not_found() => {
                debug!(session_id = %session_id, "No session to record activity on")
            }
            Err(err) => warn!(
                session_id = %session_id,
                event_id = %event.id(),
                error = %err,
                "Failed to record session activity"
            ),
        }
    }
}
