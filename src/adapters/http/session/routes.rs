//! HTTP routes for session and event endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_event, create_session, delete_session, get_session, list_events, list_sessions,
    update_session, SessionAppState,
};

/// Creates the session router with all endpoints.
pub fn session_routes(state: SessionAppState) -> Router {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route(
            "/sessions/:id",
            get(get_session).patch(update_session).delete(delete_session),
        )
        .route("/sessions/:id/event", post(create_event))
        .route("/sessions/:id/events", get(list_events))
        .with_state(state)
}
