//! Application layer - services between the HTTP adapters and the ports.
//!
//! Services own the cross-cutting request rules: per-operation storage
//! deadlines, the recording policies, and structured logging of writes.

mod event_service;
mod session_service;
mod timeout;

pub use event_service::EventService;
pub use session_service::SessionService;
