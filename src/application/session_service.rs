//! SessionService - orchestration between the HTTP boundary and session storage.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::foundation::{ClientId, SessionId};
use crate::domain::session::{Session, SessionCreationParams, SessionError, SessionUpdateParams};
use crate::ports::{ListOptions, SessionFilter, SessionReader, SessionRepository};

use super::timeout::bounded;

/// Service over the session repository and reader ports.
///
/// Every storage call is bounded by `operation_timeout`.
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    reader: Arc<dyn SessionReader>,
    operation_timeout: Duration,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        reader: Arc<dyn SessionReader>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            reader,
            operation_timeout,
        }
    }

    /// Fetch one session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    pub async fn find_by_id(&self, id: &SessionId) -> Result<Session, SessionError> {
        debug!(session_id = %id, "Fetching session");
        bounded(self.operation_timeout, "find_by_id", self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| SessionError::not_found(id))
    }

    /// All sessions owned by a client, oldest first.
    pub async fn find_all_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Session>, SessionError> {
        debug!(client_id = %client_id, "Fetching sessions for client");
        Ok(bounded(
            self.operation_timeout,
            "find_all_by_client_id",
            self.repository.find_all_by_client_id(client_id),
        )
        .await?)
    }

    /// Filtered, paginated listing.
    pub async fn list(
        &self,
        filter: &SessionFilter,
        options: &ListOptions,
    ) -> Result<Vec<Session>, SessionError> {
        debug!(
            client_id = %filter.client_id,
            visitor_id = ?filter.visitor_id.map(|v| v.to_string()),
            offset = options.offset,
            limit = options.limit,
            "Listing sessions"
        );
        if options.is_empty() {
            return Ok(Vec::new());
        }
        Ok(bounded(self.operation_timeout, "list_sessions", self.reader.list(filter, options)).await?)
    }

    /// Create a new session.
    pub async fn store(&self, params: &SessionCreationParams) -> Result<Session, SessionError> {
        let session = bounded(self.operation_timeout, "store_session", self.repository.store(params))
            .await?;
        info!(
            session_id = %session.id(),
            client_id = %session.client_id(),
            visitor_id = %session.visitor_id(),
            "Session created"
        );
        Ok(session)
    }

    /// Replace a session's mutable fields.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    pub async fn update(&self, session: &Session) -> Result<(), SessionError> {
        bounded(self.operation_timeout, "update_session", self.repository.update(session)).await?;
        debug!(session_id = %session.id(), "Session updated");
        Ok(())
    }

    /// Load a session, apply `params`, and persist the result.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `ValidationFailed` if `lastEventTime` precedes the session's creation
    pub async fn update_with(
        &self,
        id: &SessionId,
        params: SessionUpdateParams,
    ) -> Result<Session, SessionError> {
        let mut session = self.find_by_id(id).await?;
        session.apply_update(params)?;
        self.update(&session).await?;
        Ok(session)
    }

    /// Delete a session; its events are kept.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    pub async fn delete(&self, id: &SessionId) -> Result<(), SessionError> {
        bounded(self.operation_timeout, "delete_session", self.repository.delete(id)).await?;
        info!(session_id = %id, "Session deleted");
        Ok(())
    }
}
