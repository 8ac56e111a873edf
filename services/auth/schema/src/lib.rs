//! sea-orm entities owned by the auth service.

pub mod accounts;
pub mod sessions;
pub mod users;
pub mod verifications;
