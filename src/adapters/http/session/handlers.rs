//! HTTP handlers for session and event endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::adapters::http::extract::{JsonBody, QueryParams};
use crate::application::{EventService, SessionService};
use crate::config::PaginationConfig;
use crate::domain::event::EventCreationParams;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::session::{SessionCreationParams, SessionError};

use super::dto::{
    CreateEventRequest, CreateSessionRequest, ErrorResponse, EventResponse, ListEventsQuery,
    ListSessionsQuery, SessionResponse, UpdateSessionRequest,
};
use super::validation::{parse_list_options, parse_session_filter, parse_session_id};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionAppState {
    pub sessions: SessionService,
    pub events: EventService,
    pub pagination: PaginationConfig,
}

impl SessionAppState {
    pub fn new(sessions: SessionService, events: EventService, pagination: PaginationConfig) -> Self {
        Self {
            sessions,
            events,
            pagination,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /sessions - List a client's sessions, optionally for one visitor
pub async fn list_sessions(
    State(state): State<SessionAppState>,
    QueryParams(query): QueryParams<ListSessionsQuery>,
) -> Response {
    let filter = match parse_session_filter(query.client_id.as_deref(), query.visitor_id.as_deref())
    {
        Ok(filter) => filter,
        Err(e) => return validation_error(e),
    };
    let options = match parse_list_options(
        query.offset.as_deref(),
        query.limit.as_deref(),
        &state.pagination,
    ) {
        Ok(options) => options,
        Err(e) => return validation_error(e),
    };

    match state.sessions.list(&filter, &options).await {
        Ok(sessions) => {
            let body: Vec<SessionResponse> = sessions.iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /sessions - Create a session
pub async fn create_session(
    State(state): State<SessionAppState>,
    JsonBody(req): JsonBody<CreateSessionRequest>,
) -> Response {
    let params = match SessionCreationParams::parse(&req.client_id, &req.visitor_id) {
        Ok(params) => params,
        Err(e) => return validation_error(e),
    };

    match state.sessions.store(&params).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /sessions/:id - Fetch one session
pub async fn get_session(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return validation_error(e),
    };

    match state.sessions.find_by_id(&session_id).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// PATCH /sessions/:id - Update lastEventTime and/or durationInSeconds
pub async fn update_session(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<UpdateSessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return validation_error(e),
    };

    match state.sessions.update_with(&session_id, req.into()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /sessions/:id - Delete a session
pub async fn delete_session(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return validation_error(e),
    };

    match state.sessions.delete(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /sessions/:id/event - Append a DOM event
pub async fn create_event(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<CreateEventRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return validation_error(e),
    };
    let params = match EventCreationParams::new(session_id, req.dom_event) {
        Ok(params) => params,
        Err(e) => return validation_error(e),
    };

    match state.events.append(&params).await {
        Ok(event) => (StatusCode::CREATED, Json(EventResponse::from(&event))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /sessions/:id/events - List a session's events
pub async fn list_events(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    QueryParams(query): QueryParams<ListEventsQuery>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return validation_error(e),
    };
    let options = match parse_list_options(
        query.offset.as_deref(),
        query.limit.as_deref(),
        &state.pagination,
    ) {
        Ok(options) => options,
        Err(e) => return validation_error(e),
    };

    match state.events.list_by_session(&session_id, &options).await {
        Ok(events) => {
            let body: Vec<EventResponse> = events.iter().map(EventResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn validation_error(error: ValidationError) -> Response {
    handle_session_error(error.into())
}

fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            )),
        )
            .into_response(),
        SessionError::ValidationFailed {
            code,
            field,
            message,
        } => {
            warn!(field = %field, code = %code, reason = %message, "Rejected request");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(code, message)),
            )
                .into_response()
        }
        SessionError::Timeout(secs) => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::new(
                ErrorCode::Timeout,
                format!("Storage did not respond within {}s", secs),
            )),
        )
            .into_response(),
        SessionError::Infrastructure(msg) => {
            error!(error = %msg, "Request failed on storage");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}
