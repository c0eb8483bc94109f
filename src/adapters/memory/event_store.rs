//! In-memory event storage.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::event::{Event, EventCreationParams};
use crate::domain::foundation::{DomainError, EventId, SessionId, Timestamp};
use crate::ports::{EventRepository, ListOptions};

/// Append-only in-memory storage for events
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events across all sessions
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns true if no event is stored
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn append(&self, params: &EventCreationParams) -> Result<Event, DomainError> {
        let event = Event::create(EventId::new(), params.clone(), Timestamp::now());
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn list_by_session(
        &self,
        session_id: &SessionId,
        options: &ListOptions,
    ) -> Result<Vec<Event>, DomainError> {
        let events = self.events.read().await;
        let mut matching: Vec<Event> = events
            .iter()
            .filter(|e| e.session_id() == session_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(options.apply(matching))
    }

    async fn count_by_session(&self, session_id: &SessionId) -> Result<u64, DomainError> {
        let events = self.events.read().await;
        Ok(events.iter().filter(|e| e.session_id() == session_id).count() as u64)
    }
}
