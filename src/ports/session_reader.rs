//! Session reader port (read side / listing queries).
//!
//! Defines the filtered, paginated listing behind `GET /sessions`.
//!
//! # Design
//!
//! - **Client-scoped**: every listing filters by client; visitor is optional
//! - **Offset pagination**: `offset` skips matching records, `limit` bounds the page
//! - **Stable order**: creation time ascending, then id

use crate::domain::foundation::{ClientId, DomainError, VisitorId};
use crate::domain::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for session listing.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// List sessions matching `filter`, skipping `options.offset` and
    /// returning at most `options.limit` records.
    async fn list(
        &self,
        filter: &SessionFilter,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError>;

    /// Count all sessions matching `filter`, ignoring pagination.
    async fn count(&self, filter: &SessionFilter) -> Result<u64, DomainError>;
}

/// Filter for session listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFilter {
    /// Required owning client.
    pub client_id: ClientId,

    /// Optional visitor restriction.
    pub visitor_id: Option<VisitorId>,
}

impl SessionFilter {
    /// Filter on client only.
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client_id,
            visitor_id: None,
        }
    }

    /// Additionally restrict to one visitor.
    pub fn with_visitor(mut self, visitor_id: VisitorId) -> Self {
        self.visitor_id = Some(visitor_id);
        self
    }

    /// Returns true if `session` satisfies the filter.
    pub fn matches(&self, session: &Session) -> bool {
        session.client_id() == &self.client_id
            && self
                .visitor_id
                .map_or(true, |visitor| session.visitor_id() == &visitor)
    }
}

/// Offset pagination options shared by session and event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Number of matching records to skip.
    pub offset: u64,

    /// Maximum number of records to return.
    pub limit: u64,
}

impl ListOptions {
    /// Create options for an offset/limit window.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Returns true if the window can never contain a record.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Apply the window to an already ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}
