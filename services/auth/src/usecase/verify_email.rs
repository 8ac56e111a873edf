use chrono::{DateTime, Utc};

use crate::domain::repository::{AuthUnitOfWork, IdentityRepository, VerificationRepository};
use crate::error::AuthServiceError;

pub struct VerifyEmailInput {
    /// The email address being verified.
    pub identifier: String,
    pub token: String,
}

pub struct VerifyEmailUseCase<I, V, U>
where
    I: IdentityRepository,
    V: VerificationRepository,
    U: AuthUnitOfWork,
{
    pub identities: I,
    pub verifications: V,
    pub uow: U,
}

impl<I, V, U> VerifyEmailUseCase<I, V, U>
where
    I: IdentityRepository,
    V: VerificationRepository,
    U: AuthUnitOfWork,
{
    pub async fn execute(
        &self,
        input: VerifyEmailInput,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        let verification = self
            .verifications
            .find_by_identifier_and_token(&input.identifier, &input.token)
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        if verification.is_expired_at(now) {
            return Err(AuthServiceError::ExpiredToken);
        }

        let identity = self
            .identities
            .find_by_email(&input.identifier)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Rows are deleted on success; a live row for a verified identity is stale.
        if identity.email_verified {
            return Err(AuthServiceError::InvalidToken);
        }

        self.uow
            .commit_email_verification(identity.id, &verification, now)
            .await?;

        tracing::info!(user_id = %identity.id, "email verified");
        Ok(())
    }
}
