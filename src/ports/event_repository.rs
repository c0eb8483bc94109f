//! Event repository port.
//!
//! Events are append-only: the contract has no update or delete.

use crate::domain::event::{Event, EventCreationParams};
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

use super::ListOptions;

/// Repository port for event persistence.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event, assigning its id and creation time.
    ///
    /// Does not check that the session exists; that is a service policy.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, params: &EventCreationParams) -> Result<Event, DomainError>;

    /// List events of one session, oldest first.
    async fn list_by_session(
        &self,
        session_id: &SessionId,
        options: &ListOptions,
    ) -> Result<Vec<Event>, DomainError>;

    /// Count events recorded for one session.
    async fn count_by_session(&self, session_id: &SessionId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EventRepository) {}
    }
}
