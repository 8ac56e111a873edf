use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use flocky_auth_types::identity::CurrentIdentity;

/// Provider name for email + password credentials.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Email-verification token lifetime in hours.
pub const VERIFICATION_TTL_HOURS: i64 = 24;

/// Random bytes behind every opaque token (256 bits).
pub const TOKEN_BYTE_LENGTH: usize = 32;

/// A registered person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn new_unverified(email: String, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            name,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Identity> for CurrentIdentity {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            name: identity.name,
            email_verified: identity.email_verified,
        }
    }
}

/// Authentication method bound to an identity. `password_hash` is an argon2
/// PHC string and is `None` for non-password providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    pub fn password(user_id: Uuid, email: &str, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            provider: CREDENTIALS_PROVIDER.to_owned(),
            provider_account_id: email.to_owned(),
            password_hash: Some(password_hash),
            created_at: now,
        }
    }
}

/// Request metadata recorded on a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Bearer-token session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(user_id: Uuid, token: String, client: ClientInfo, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            token,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            created_at: now,
        }
    }

    /// A session is accepted strictly before its expiry instant.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Session joined with its owner, as returned by token lookup.
#[derive(Debug, Clone)]
pub struct SessionWithIdentity {
    pub session: Session,
    pub identity: Identity,
}

/// Pending email-verification challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub id: Uuid,
    /// The email being verified.
    pub identifier: String,
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Verification {
    pub fn issue(identifier: &str, value: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            identifier: identifier.to_owned(),
            value,
            expires_at: now + Duration::hours(VERIFICATION_TTL_HOURS),
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Everything one registration writes. Committed as a single unit.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identity: Identity,
    pub credential: Credential,
    pub verification: Verification,
    pub session: Session,
}
