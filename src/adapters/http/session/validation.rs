//! Request parameter parsing.
//!
//! Everything here runs before a service call, so malformed input never
//! reaches storage.

use crate::config::PaginationConfig;
use crate::domain::foundation::{ClientId, SessionId, ValidationError, VisitorId};
use crate::ports::{ListOptions, SessionFilter};

/// Parse a session id taken from the path.
pub fn parse_session_id(raw: &str) -> Result<SessionId, ValidationError> {
    SessionId::parse(raw)
}

/// Build the listing filter. `clientId` is required; an empty `visitorId`
/// counts as absent.
pub fn parse_session_filter(
    client_id: Option<&str>,
    visitor_id: Option<&str>,
) -> Result<SessionFilter, ValidationError> {
    let client_id = client_id.ok_or_else(|| ValidationError::empty_field(ClientId::field_name()))?;
    let filter = SessionFilter::for_client(ClientId::parse(client_id)?);

    match visitor_id.filter(|v| !v.is_empty()) {
        Some(visitor_id) => Ok(filter.with_visitor(VisitorId::parse(visitor_id)?)),
        None => Ok(filter),
    }
}

/// Parse `offset`/`limit`, applying defaults and clamping `limit`.
pub fn parse_list_options(
    offset: Option<&str>,
    limit: Option<&str>,
    pagination: &PaginationConfig,
) -> Result<ListOptions, ValidationError> {
    let offset = match offset {
        Some(raw) => parse_count("offset", raw)?,
        None => 0,
    };
    let limit = match limit {
        Some(raw) => parse_count("limit", raw)?,
        None => pagination.default_limit,
    };
    Ok(ListOptions::new(offset, limit.min(pagination.max_limit)))
}

fn parse_count(field: &str, raw: &str) -> Result<u64, ValidationError> {
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }
    // A leading '-' on an otherwise numeric value is a range error
    match raw.parse::<i64>() {
        Ok(value) if value < 0 => Err(ValidationError::out_of_range(field, 0, i64::MAX, value)),
        Ok(value) => Ok(value.unsigned_abs()),
        Err(_) if is_negative_integer(raw) => {
            Err(ValidationError::out_of_range(field, 0, i64::MAX, i64::MIN))
        }
        Err(_) => Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a non-negative integer", raw),
        )),
    }
}

fn is_negative_integer(raw: &str) -> bool {
    raw.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
