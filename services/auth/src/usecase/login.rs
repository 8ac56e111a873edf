use chrono::{DateTime, Utc};

use crate::domain::password;
use crate::domain::repository::{CredentialRepository, IdentityRepository, SessionRepository};
use crate::domain::token::generate_token;
use crate::domain::types::{CREDENTIALS_PROVIDER, ClientInfo, Session};
use crate::error::AuthServiceError;
use crate::usecase::AuthOutput;

pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub client: ClientInfo,
}

pub struct LoginUseCase<I: IdentityRepository, C: CredentialRepository, S: SessionRepository> {
    pub identities: I,
    pub credentials: C,
    pub sessions: S,
}

impl<I, C, S> LoginUseCase<I, C, S>
where
    I: IdentityRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    /// Unknown email, missing hash and wrong password all fail with the same
    /// `InvalidCredentials` after one argon2 verification.
    pub async fn execute(
        &self,
        input: LoginInput,
        now: DateTime<Utc>,
    ) -> Result<AuthOutput, AuthServiceError> {
        let credential = self
            .credentials
            .find_by_provider_and_identifier(CREDENTIALS_PROVIDER, &input.email)
            .await?;

        let (user_id, stored_hash) = match credential {
            Some(c) => (Some(c.user_id), c.password_hash),
            None => (None, None),
        };

        let matched = password::verify(input.password, stored_hash).await?;
        let Some(user_id) = user_id.filter(|_| matched) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let identity = self
            .identities
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let session = Session::issue(identity.id, generate_token(), input.client, now);
        self.sessions.create(&session).await?;

        tracing::info!(user_id = %identity.id, "user logged in");

        Ok(AuthOutput {
            token: session.token,
            expires_at: session.expires_at,
            user: identity,
        })
    }
}
