//! Shared service plumbing for Elaview backends.
//!
//! Response envelopes, env-config helpers, health endpoints, request-id
//! middleware, serialization helpers, tracing init, and SeaORM extensions.

pub mod config;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
