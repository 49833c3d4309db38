//! Test utilities for Elaview services.
//!
//! Provides `MockAuth` identity headers and a golden-fixture loader.
//! Import in `#[cfg(test)]` blocks and `[dev-dependencies]` only — never in
//! production code.

pub mod auth;
pub mod fixture;
