#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    Credential, Identity, Registration, Session, SessionWithIdentity, Verification,
};
use crate::error::AuthServiceError;

/// Read access to registered identities.
pub trait IdentityRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, AuthServiceError>;
}

/// Per-identity authentication records.
pub trait CredentialRepository: Send + Sync {
    /// Insert a credential. A duplicate (provider, provider account id) pair
    /// fails with `Conflict`, enforced by the storage layer.
    async fn save(&self, credential: &Credential) -> Result<(), AuthServiceError>;

    async fn find_by_provider_and_identifier(
        &self,
        provider: &str,
        identifier: &str,
    ) -> Result<Option<Credential>, AuthServiceError>;
}

/// Active bearer-token sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), AuthServiceError>;

    /// Look up a session together with its owner in one round trip.
    /// Expired sessions are returned as-is; callers decide validity.
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SessionWithIdentity>, AuthServiceError>;

    /// Idempotent: deleting an unknown token is not an error.
    async fn delete_by_token(&self, token: &str) -> Result<(), AuthServiceError>;

    async fn delete_all_for_identity(&self, identity_id: Uuid) -> Result<(), AuthServiceError>;

    /// Delete sessions whose expiry is at or before `now`. Returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError>;
}

/// Pending email-verification challenges.
pub trait VerificationRepository: Send + Sync {
    async fn create(&self, verification: &Verification) -> Result<(), AuthServiceError>;

    async fn find_by_identifier_and_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<Verification>, AuthServiceError>;

    async fn delete_all_for_identifier(&self, identifier: &str) -> Result<(), AuthServiceError>;
}

/// Multi-row writes that must commit or roll back together.
pub trait AuthUnitOfWork: Send + Sync {
    /// Insert identity, credential, verification and session atomically.
    /// Any uniqueness violation rolls everything back and yields `Conflict`.
    async fn commit_registration(
        &self,
        registration: &Registration,
    ) -> Result<(), AuthServiceError>;

    /// Consume `verification`, flip the identity's verified flag and delete
    /// every other verification row for the same identifier, atomically.
    ///
    /// The checks run inside the commit: a token that is already consumed or
    /// an identity that is already verified fails with `InvalidToken`, a
    /// missing identity with `NotFound`. Any failure writes nothing.
    async fn commit_email_verification(
        &self,
        identity_id: Uuid,
        verification: &Verification,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;
}
