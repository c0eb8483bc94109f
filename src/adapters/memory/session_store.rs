//! In-memory session storage.
//!
//! Implements the session ports over a `RwLock`-guarded vector. Records are
//! kept in insertion order; listings are sorted by creation time then id.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClientId, DomainError, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCreationParams};
use crate::ports::{
    session_not_found, ListOptions, SessionFilter, SessionReader, SessionRepository,
    StorageHealth,
};

/// In-memory storage for sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<Vec<Session>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no session is stored
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    fn sorted(mut sessions: Vec<Session>) -> Vec<Session> {
        sessions.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        sessions
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.iter().find(|s| s.id() == id).cloned())
    }

    async fn find_all_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        let owned = sessions
            .iter()
            .filter(|s| s.belongs_to(client_id))
            .cloned()
            .collect();
        Ok(Self::sorted(owned))
    }

    async fn store(&self, params: &SessionCreationParams) -> Result<Session, DomainError> {
        let session = Session::create(SessionId::new(), *params, Timestamp::now());
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.iter_mut().find(|s| s.id() == session.id()) {
            Some(slot) => {
                *slot = session.clone();
                Ok(())
            }
            None => Err(session_not_found(session.id())),
        }
    }

    async fn record_activity(&self, id: &SessionId, at: Timestamp) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.iter_mut().find(|s| s.id() == id) {
            Some(session) => Ok(session.record_activity(at)),
            None => Err(session_not_found(id)),
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.id() != id);
        if sessions.len() == before {
            return Err(session_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionReader for InMemorySessionStore {
    async fn list(
        &self,
        filter: &SessionFilter,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        let sessions = self.sessions.read().await;
        let matching = sessions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        Ok(options.apply(Self::sorted(matching)))
    }

    async fn count(&self, filter: &SessionFilter) -> Result<u64, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.iter().filter(|s| filter.matches(s)).count() as u64)
    }
}

#[async_trait]
impl StorageHealth for InMemorySessionStore {
    async fn check(&self) -> Result<String, DomainError> {
        Ok(format!("in-memory ({} sessions)", self.len().await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::VisitorId;

    const CLIENT: &str = "507f1f77bcf86cd799439011";
    const OTHER_CLIENT: &str = "5f8d0d55b54764421b7156c9";
    const VISITOR: &str = "507f191e810c19729de860ea";
    const OTHER_VISITOR: &str = "65a1b2c3d4e5f60718293a4b";

    fn params(client: &str, visitor: &str) -> SessionCreationParams {
        SessionCreationParams::parse(client, visitor).unwrap()
    }

    #[tokio::test]
    async fn store_assigns_fresh_ids_and_initial_state() {
        let store = InMemorySessionStore::new();
        let first = store.store(&params(CLIENT, VISITOR)).await.unwrap();
        let second = store.store(&params(CLIENT, VISITOR)).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.duration_in_seconds(), 0);
        assert_eq!(first.created_at(), first.updated_at());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn find_by_id_returns_stored_session() {
        let store = InMemorySessionStore::new();
        let session = store.store(&params(CLIENT, VISITOR)).await.unwrap();

        let found = store.find_by_id(session.id()).await.unwrap();
        assert_eq!(found, Some(session));
        assert!(store.find_by_id(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_by_client_id_filters_by_owner() {
        let store = InMemorySessionStore::new();
        store.store(&params(CLIENT, VISITOR)).await.unwrap();
        store.store(&params(CLIENT, OTHER_VISITOR)).await.unwrap();
        store.store(&params(OTHER_CLIENT, VISITOR)).await.unwrap();

        let client = ClientId::parse(CLIENT).unwrap();
        let owned = store.find_all_by_client_id(&client).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|s| s.belongs_to(&client)));

        let nobody = ClientId::parse("65a1b2c3d4e5f60718293a4c").unwrap();
        assert!(store.find_all_by_client_id(&nobody).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_existing_record() {
        let store = InMemorySessionStore::new();
        let mut session = store.store(&params(CLIENT, VISITOR)).await.unwrap();
        session.record_activity(session.created_at().plus_secs(12));

        store.update(&session).await.unwrap();

        let found = store.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found.duration_in_seconds(), 12);
    }

    #[tokio::test]
    async fn record_activity_only_moves_forward() {
        let store = InMemorySessionStore::new();
        let session = store.store(&params(CLIENT, VISITOR)).await.unwrap();
        let newer = session.created_at().plus_secs(40);
        let older = session.created_at().plus_secs(15);

        assert!(store.record_activity(session.id(), newer).await.unwrap());
        assert!(!store.record_activity(session.id(), older).await.unwrap());

        let found = store.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found.last_event_time(), &newer);
        assert_eq!(found.duration_in_seconds(), 40);
    }

    #[tokio::test]
    async fn record_activity_on_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = store
            .record_activity(&SessionId::new(), Timestamp::now())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let session = Session::create(SessionId::new(), params(CLIENT, VISITOR), Timestamp::now());

        let err = store.update(&session).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_second_time() {
        let store = InMemorySessionStore::new();
        let session = store.store(&params(CLIENT, VISITOR)).await.unwrap();
        store.store(&params(CLIENT, OTHER_VISITOR)).await.unwrap();

        store.delete(session.id()).await.unwrap();
        let err = store.delete(session.id()).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn list_applies_filter_and_window() {
        let store = InMemorySessionStore::new();
        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(store.store(&params(CLIENT, VISITOR)).await.unwrap());
        }
        store.store(&params(CLIENT, OTHER_VISITOR)).await.unwrap();
        store.store(&params(OTHER_CLIENT, VISITOR)).await.unwrap();

        let filter = SessionFilter::for_client(ClientId::parse(CLIENT).unwrap())
            .with_visitor(VisitorId::parse(VISITOR).unwrap());

        let page = store.list(&filter, &ListOptions::new(1, 2)).await.unwrap();
        let expected: Vec<Session> = InMemorySessionStore::sorted(created)
            .into_iter()
            .skip(1)
            .take(2)
            .collect();
        assert_eq!(page, expected);
        assert_eq!(store.count(&filter).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn list_with_zero_limit_is_empty() {
        let store = InMemorySessionStore::new();
        store.store(&params(CLIENT, VISITOR)).await.unwrap();

        let filter = SessionFilter::for_client(ClientId::parse(CLIENT).unwrap());
        assert!(store.list(&filter, &ListOptions::new(0, 0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_reports_in_memory() {
        let store = InMemorySessionStore::new();
        assert!(store.check().await.unwrap().starts_with("in-memory"));
    }
}
