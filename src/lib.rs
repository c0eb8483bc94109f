//! Session Recorder - visitor session and DOM event recording service
//!
//! Clients create sessions for their visitors, append DOM events to them, and
//! list sessions by client and visitor with offset pagination. Storage is
//! PostgreSQL or in-memory behind the same ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
