//! Deadline wrapper for storage calls.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Runs a repository call with an upper bound on its duration.
///
/// Expiry yields `ErrorCode::Timeout`; the call is not retried.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                operation,
                timeout_secs = limit.as_secs(),
                "Storage operation timed out"
            );
            Err(DomainError::new(
                ErrorCode::Timeout,
                format!("{} timed out after {}s", operation, limit.as_secs()),
            )
            .with_detail("timeout_secs", limit.as_secs().to_string()))
        }
    }
}
