//! Auth types shared across Flocky services.
//!
//! Provides bearer-token extraction and the `CurrentIdentity` extractor that
//! reads the identity attached by the auth service's session resolver.

pub mod bearer;
pub mod identity;
