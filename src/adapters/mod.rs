//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL repositories
//! - `memory` - in-process repositories for tests and local runs
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod postgres;
