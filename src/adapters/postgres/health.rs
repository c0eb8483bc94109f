//! PostgreSQL reachability check.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::StorageHealth;

use super::pool::database_error;

/// Reports the server version, proving a round trip works.
#[derive(Clone)]
pub struct PostgresHealth {
    pool: PgPool,
}

impl PostgresHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageHealth for PostgresHealth {
    async fn check(&self) -> Result<String, DomainError> {
        let row: (String,) = sqlx::query_as("SELECT version()")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Health check failed"))?;
        Ok(row.0)
    }
}
