//! Session repository port (write side).
//!
//! Defines the storage-agnostic contract for persisting and retrieving
//! sessions. Every operation is atomic at single-record granularity; no
//! implicit transaction spans more than one record.

use crate::domain::foundation::{ClientId, DomainError, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCreationParams};
use async_trait::async_trait;

/// Repository port for Session persistence.
///
/// Implementations assign identifiers and timestamps in [`store`], and must
/// report a missing record as `ErrorCode::SessionNotFound` from [`update`]
/// and [`delete`].
///
/// [`store`]: SessionRepository::store
/// [`update`]: SessionRepository::update
/// [`delete`]: SessionRepository::delete
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find all sessions owned by a client.
    ///
    /// Returns an empty vector when none match. Ordered by creation time.
    async fn find_all_by_client_id(&self, client_id: &ClientId)
        -> Result<Vec<Session>, DomainError>;

    /// Persist a new session built from `params`.
    ///
    /// The repository assigns the id and the creation timestamps, and returns
    /// the stored record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn store(&self, params: &SessionCreationParams) -> Result<Session, DomainError>;

    /// Replace the mutable fields of an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Move the session's `lastEventTime` forward to `at`, recomputing its
    /// duration, as one atomic step in storage.
    ///
    /// A timestamp not newer than the stored `lastEventTime` changes nothing
    /// and returns `false`, so concurrent callers can never move it backward.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn record_activity(&self, id: &SessionId, at: Timestamp) -> Result<bool, DomainError>;

    /// Delete a session.
    ///
    /// Events recorded for the session are left in place.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Builds the not-found error adapters return for an unknown session id.
pub fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::new(
        crate::domain::foundation::ErrorCode::SessionNotFound,
        format!("Session not found: {}", id),
    )
    .with_detail("session_id", id.to_string())
}
