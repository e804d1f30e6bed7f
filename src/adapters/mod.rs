//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed repository
//! - `memory` - in-memory repository for tests and local development
//! - `auth` - JWT auth provider (and a test mock)
//! - `workflow` - reminder-workflow dispatcher stand-ins
//! - `http` - axum REST surface

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod workflow;
