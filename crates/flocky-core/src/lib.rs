//! Ambient plumbing shared by Flocky services: env config, the common error
//! envelope, health probes, request ids, tracing and timestamp formatting.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
