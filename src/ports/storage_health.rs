//! Storage health port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Reports whether the storage backend is reachable.
#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// Returns a short description of the backend (e.g. server version).
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the backend cannot be reached
    async fn check(&self) -> Result<String, DomainError>;
}
