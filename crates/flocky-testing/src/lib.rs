//! Test utilities for Flocky services.
//!
//! Import from `[dev-dependencies]` only, never from production code.

pub mod auth;
pub mod http;
pub mod postgres;
