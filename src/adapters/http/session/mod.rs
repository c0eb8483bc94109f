//! HTTP adapter for session and event endpoints.

mod dto;
mod handlers;
mod routes;
mod validation;

pub use dto::{
    CreateEventRequest, CreateSessionRequest, ErrorResponse, EventResponse, ListEventsQuery,
    ListSessionsQuery, SessionResponse, UpdateSessionRequest,
};
pub use handlers::SessionAppState;
pub use routes::session_routes;
pub use validation::{parse_list_options, parse_session_filter, parse_session_id};
