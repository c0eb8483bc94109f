//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::event::{Event, EventCreationParams};
use crate::domain::foundation::{DomainError, EventId, SessionId, Timestamp};
use crate::ports::{EventRepository, ListOptions};

use super::pool::{column_error, database_error, to_sql_count};
use super::session_repository::stored_id;

/// PostgreSQL implementation of EventRepository.
#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a new PostgresEventRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn append(&self, params: &EventCreationParams) -> Result<Event, DomainError> {
        let event = Event::create(EventId::new(), params.clone(), Timestamp::now());

        sqlx::query(
            r#"
            INSERT INTO events (id, session_id, dom_event, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.id().to_string())
        .bind(event.session_id().to_string())
        .bind(event.dom_event())
        .bind(event.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to insert event"))?;

        Ok(event)
    }

    async fn list_by_session(
        &self,
        session_id: &SessionId,
        options: &ListOptions,
    ) -> Result<Vec<Event>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, dom_event, created_at
            FROM events
            WHERE session_id = $1
            ORDER BY created_at ASC, id ASC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(session_id.to_string())
        .bind(to_sql_count(options.offset))
        .bind(to_sql_count(options.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list events"))?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn count_by_session(&self, session_id: &SessionId) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE session_id = $1")
            .bind(session_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Failed to count events"))?;

        Ok(result.0.max(0) as u64)
    }
}

fn row_to_event(row: sqlx::postgres::PgRow) -> Result<Event, DomainError> {
    let id: String = row.try_get("id").map_err(column_error("id"))?;
    let session_id: String = row.try_get("session_id").map_err(column_error("session_id"))?;
    let dom_event: String = row.try_get("dom_event").map_err(column_error("dom_event"))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(column_error("created_at"))?;

    Ok(Event::reconstitute(
        stored_id("id", EventId::parse(&id))?,
        stored_id("session_id", SessionId::parse(&session_id))?,
        dom_event,
        Timestamp::from_datetime(created_at),
    ))
}
