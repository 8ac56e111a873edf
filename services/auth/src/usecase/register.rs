use chrono::{DateTime, Utc};

use crate::domain::password;
use crate::domain::repository::{AuthUnitOfWork, IdentityRepository};
use crate::domain::token::generate_token;
use crate::domain::types::{ClientInfo, Credential, Identity, Registration, Session, Verification};
use crate::error::AuthServiceError;
use crate::usecase::AuthOutput;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub client: ClientInfo,
}

pub struct RegisterUseCase<I: IdentityRepository, U: AuthUnitOfWork> {
    pub identities: I,
    pub uow: U,
}

impl<I: IdentityRepository, U: AuthUnitOfWork> RegisterUseCase<I, U> {
    /// Create an unverified identity with a password credential, a pending
    /// email verification and a first session, all in one commit.
    pub async fn execute(
        &self,
        input: RegisterInput,
        now: DateTime<Utc>,
    ) -> Result<AuthOutput, AuthServiceError> {
        if self.identities.find_by_email(&input.email).await?.is_some() {
            return Err(AuthServiceError::Conflict);
        }

        let password_hash = password::hash(input.password).await?;

        let identity = Identity::new_unverified(input.email, input.name, now);
        let credential = Credential::password(identity.id, &identity.email, password_hash, now);
        let verification = Verification::issue(&identity.email, generate_token(), now);
        let session = Session::issue(identity.id, generate_token(), input.client, now);

        let registration = Registration {
            identity,
            credential,
            verification,
            session,
        };
        self.uow.commit_registration(&registration).await?;

        tracing::info!(user_id = %registration.identity.id, "user registered");

        Ok(AuthOutput {
            token: registration.session.token,
            expires_at: registration.session.expires_at,
            user: registration.identity,
        })
    }
}
