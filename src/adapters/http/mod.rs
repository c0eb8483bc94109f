//! HTTP adapters - REST API implementations.
//!
//! - `session` - session and event endpoints
//! - `health` - storage reachability
//! - `extract` - JSON body and query extractors with the API error body
//! - `router` - route assembly and middleware

mod extract;
mod health;
mod router;
pub mod session;

pub use extract::{JsonBody, QueryParams};
pub use health::health_routes;
pub use router::build_router;
pub use session::{session_routes, SessionAppState};
