//! PostgreSQL implementation of SessionReader.
//!
//! Listing queries are served by the `(client_id, visitor_id, created_at, id)`
//! index.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::session::Session;
use crate::ports::{ListOptions, SessionFilter, SessionReader};

use super::pool::{database_error, to_sql_count};
use super::session_repository::{row_to_session, SESSION_COLUMNS};

/// PostgreSQL implementation of SessionReader.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    /// Creates a new PostgresSessionReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn list(
        &self,
        filter: &SessionFilter,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM sessions
            WHERE client_id = $1
              AND ($2::TEXT IS NULL OR visitor_id = $2)
            ORDER BY created_at ASC, id ASC
            OFFSET $3
            LIMIT $4
            "#,
            SESSION_COLUMNS
        ))
        .bind(filter.client_id.to_string())
        .bind(filter.visitor_id.map(|v| v.to_string()))
        .bind(to_sql_count(options.offset))
        .bind(to_sql_count(options.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list sessions"))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn count(&self, filter: &SessionFilter) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM sessions
            WHERE client_id = $1
              AND ($2::TEXT IS NULL OR visitor_id = $2)
            "#,
        )
        .bind(filter.client_id.to_string())
        .bind(filter.visitor_id.map(|v| v.to_string()))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to count sessions"))?;

        Ok(result.0.max(0) as u64)
    }
}
