pub mod login;
pub mod logout;
pub mod register;
pub mod session_sweep;
pub mod verify_email;

use chrono::{DateTime, Utc};

use crate::domain::types::Identity;

/// Result of a successful register or login: the new session's bearer token
/// and the identity it belongs to.
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: Identity,
}
