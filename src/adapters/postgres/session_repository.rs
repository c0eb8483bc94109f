//! PostgreSQL implementation of SessionRepository.
//!
//! Persists Session records to the `sessions` table. Ids are stored as their
//! 24-character hex form.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, SessionId, Timestamp, ValidationError, VisitorId,
};
use crate::domain::session::{Session, SessionCreationParams};
use crate::ports::{session_not_found, SessionRepository};

use super::pool::{column_error, database_error};

pub(super) const SESSION_COLUMNS: &str = "id, client_id, visitor_id, last_event_time, \
     duration_in_seconds, created_at, updated_at";

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch session"))?;

        row.map(row_to_session).transpose()
    }

    async fn find_all_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE client_id = $1 ORDER BY created_at ASC, id ASC",
            SESSION_COLUMNS
        ))
        .bind(client_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to fetch sessions by client"))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn store(&self, params: &SessionCreationParams) -> Result<Session, DomainError> {
        let session = Session::create(SessionId::new(), *params, Timestamp::now());

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, client_id, visitor_id, last_event_time,
                duration_in_seconds, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id().to_string())
        .bind(session.client_id().to_string())
        .bind(session.visitor_id().to_string())
        .bind(session.last_event_time().as_datetime())
        .bind(duration_to_sql(session.duration_in_seconds())?)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to insert session"))?;

        Ok(session)
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                last_event_time = $2,
                duration_in_seconds = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(session.id().to_string())
        .bind(session.last_event_time().as_datetime())
        .bind(duration_to_sql(session.duration_in_seconds())?)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to update session"))?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(session.id()));
        }

        Ok(())
    }

    async fn record_activity(&self, id: &SessionId, at: Timestamp) -> Result<bool, DomainError> {
        // The row lock plus the WHERE re-check keep last_event_time monotonic
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                last_event_time = $2,
                duration_in_seconds = FLOOR(EXTRACT(EPOCH FROM ($2 - created_at)))::BIGINT,
                updated_at = GREATEST(updated_at, $3)
            WHERE id = $1 AND last_event_time < $2
            "#,
        )
        .bind(id.to_string())
        .bind(at.as_datetime())
        .bind(Timestamp::now().max(at).as_datetime())
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to record session activity"))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        if self.exists(id).await? {
            Ok(false)
        } else {
            Err(session_not_found(id))
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to delete session"))?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(id));
        }

        Ok(())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = $1)")
                .bind(id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(database_error("Failed to check session existence"))?;

        Ok(result.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn duration_to_sql(duration: u64) -> Result<i64, DomainError> {
    i64::try_from(duration).map_err(|_| {
        DomainError::new(
            ErrorCode::OutOfRange,
            format!("durationInSeconds {} does not fit in storage", duration),
        )
        .with_detail("field", "durationInSeconds")
    })
}

fn duration_from_sql(duration: i64) -> Result<u64, DomainError> {
    u64::try_from(duration).map_err(|_| {
        DomainError::database(format!("Invalid duration_in_seconds: {}", duration))
    })
}

/// Rejects a stored id that is not valid hex.
pub(super) fn stored_id<T>(
    column: &str,
    parsed: Result<T, ValidationError>,
) -> Result<T, DomainError> {
    parsed.map_err(|e| DomainError::database(format!("Invalid {} in storage: {}", column, e)))
}

pub(super) fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: String = row.try_get("id").map_err(column_error("id"))?;
    let client_id: String = row.try_get("client_id").map_err(column_error("client_id"))?;
    let visitor_id: String = row.try_get("visitor_id").map_err(column_error("visitor_id"))?;
    let last_event_time: chrono::DateTime<chrono::Utc> = row
        .try_get("last_event_time")
        .map_err(column_error("last_event_time"))?;
    let duration: i64 = row
        .try_get("duration_in_seconds")
        .map_err(column_error("duration_in_seconds"))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(column_error("created_at"))?;
    let updated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_at").map_err(column_error("updated_at"))?;

    Ok(Session::reconstitute(
        stored_id("id", SessionId::parse(&id))?,
        stored_id("client_id", ClientId::parse(&client_id))?,
        stored_id("visitor_id", VisitorId::parse(&visitor_id))?,
        Timestamp::from_datetime(last_event_time),
        duration_from_sql(duration)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
