use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, SqlErr, TransactionError, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use flocky_auth_schema::{accounts, sessions, users, verifications};

use crate::domain::repository::{
    AuthUnitOfWork, CredentialRepository, IdentityRepository, SessionRepository,
    VerificationRepository,
};
use crate::domain::types::{
    Credential, Identity, Registration, Session, SessionWithIdentity, Verification,
};
use crate::error::AuthServiceError;

/// Map an insert failure: unique violations become `Conflict`, everything
/// else is an internal error.
fn write_error(err: DbErr, what: &'static str) -> AuthServiceError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return AuthServiceError::Conflict;
    }
    AuthServiceError::Internal(anyhow::Error::new(err).context(what))
}

fn from_transaction_error(
    err: TransactionError<AuthServiceError>,
    what: &'static str,
) -> AuthServiceError {
    match err {
        TransactionError::Connection(e) => write_error(e, what),
        TransactionError::Transaction(e) => e,
    }
}

// ── Identity repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIdentityRepository {
    pub db: DatabaseConnection,
}

impl IdentityRepository for DbIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(identity_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(identity_from_model))
    }
}

async fn insert_identity<C: ConnectionTrait>(conn: &C, identity: &Identity) -> Result<(), DbErr> {
    users::ActiveModel {
        id: Set(identity.id),
        email: Set(identity.email.clone()),
        name: Set(identity.name.clone()),
        email_verified: Set(identity.email_verified),
        created_at: Set(identity.created_at),
        updated_at: Set(identity.updated_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn identity_from_model(model: users::Model) -> Identity {
    Identity {
        id: model.id,
        email: model.email,
        name: model.name,
        email_verified: model.email_verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Credential repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCredentialRepository {
    pub db: DatabaseConnection,
}

impl CredentialRepository for DbCredentialRepository {
    async fn save(&self, credential: &Credential) -> Result<(), AuthServiceError> {
        insert_credential(&self.db, credential)
            .await
            .map_err(|e| write_error(e, "insert account"))
    }

    async fn find_by_provider_and_identifier(
        &self,
        provider: &str,
        identifier: &str,
    ) -> Result<Option<Credential>, AuthServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Provider.eq(provider))
            .filter(accounts::Column::ProviderAccountId.eq(identifier))
            .one(&self.db)
            .await
            .context("find account by provider")?;
        Ok(model.map(credential_from_model))
    }
}

async fn insert_credential<C: ConnectionTrait>(
    conn: &C,
    credential: &Credential,
) -> Result<(), DbErr> {
    accounts::ActiveModel {
        id: Set(credential.id),
        user_id: Set(credential.user_id),
        provider: Set(credential.provider.clone()),
        provider_account_id: Set(credential.provider_account_id.clone()),
        password: Set(credential.password_hash.clone()),
        access_token: Set(None),
        refresh_token: Set(None),
        id_token: Set(None),
        access_token_expires_at: Set(None),
        refresh_token_expires_at: Set(None),
        scope: Set(None),
        created_at: Set(credential.created_at),
        updated_at: Set(credential.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn credential_from_model(model: accounts::Model) -> Credential {
    Credential {
        id: model.id,
        user_id: model.user_id,
        provider: model.provider,
        provider_account_id: model.provider_account_id,
        password_hash: model.password,
        created_at: model.created_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), AuthServiceError> {
        insert_session(&self.db, session)
            .await
            .map_err(|e| write_error(e, "insert session"))
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SessionWithIdentity>, AuthServiceError> {
        let row = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find session by token")?;
        Ok(row.and_then(|(session, user)| {
            user.map(|user| SessionWithIdentity {
                session: session_from_model(session),
                identity: identity_from_model(user),
            })
        }))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthServiceError> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::Token.eq(token))
            .exec(&self.db)
            .await
            .context("delete session by token")?;
        Ok(())
    }

    async fn delete_all_for_identity(&self, identity_id: Uuid) -> Result<(), AuthServiceError> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::UserId.eq(identity_id))
            .exec(&self.db)
            .await
            .context("delete sessions for user")?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired sessions")?;
        Ok(result.rows_affected)
    }
}

async fn insert_session<C: ConnectionTrait>(conn: &C, session: &Session) -> Result<(), DbErr> {
    sessions::ActiveModel {
        id: Set(session.id),
        user_id: Set(session.user_id),
        token: Set(session.token.clone()),
        expires_at: Set(session.expires_at),
        ip_address: Set(session.ip_address.clone()),
        user_agent: Set(session.user_agent.clone()),
        created_at: Set(session.created_at),
        updated_at: Set(session.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        token: model.token,
        expires_at: model.expires_at,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

// ── Verification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationRepository {
    pub db: DatabaseConnection,
}

impl VerificationRepository for DbVerificationRepository {
    async fn create(&self, verification: &Verification) -> Result<(), AuthServiceError> {
        insert_verification(&self.db, verification)
            .await
            .map_err(|e| write_error(e, "insert verification"))
    }

    async fn find_by_identifier_and_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<Verification>, AuthServiceError> {
        let model = verifications::Entity::find()
            .filter(verifications::Column::Identifier.eq(identifier))
            .filter(verifications::Column::Value.eq(token))
            .one(&self.db)
            .await
            .context("find verification")?;
        Ok(model.map(verification_from_model))
    }

    async fn delete_all_for_identifier(&self, identifier: &str) -> Result<(), AuthServiceError> {
        delete_verifications(&self.db, identifier)
            .await
            .context("delete verifications")?;
        Ok(())
    }
}

async fn insert_verification<C: ConnectionTrait>(
    conn: &C,
    verification: &Verification,
) -> Result<(), DbErr> {
    verifications::ActiveModel {
        id: Set(verification.id),
        identifier: Set(verification.identifier.clone()),
        value: Set(verification.value.clone()),
        expires_at: Set(verification.expires_at),
        created_at: Set(verification.created_at),
        updated_at: Set(verification.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

async fn delete_verifications<C: ConnectionTrait>(conn: &C, identifier: &str) -> Result<(), DbErr> {
    verifications::Entity::delete_many()
        .filter(verifications::Column::Identifier.eq(identifier))
        .exec(conn)
        .await?;
    Ok(())
}

fn verification_from_model(model: verifications::Model) -> Verification {
    Verification {
        id: model.id,
        identifier: model.identifier,
        value: model.value,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Unit of work ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuthUnitOfWork {
    pub db: DatabaseConnection,
}

impl AuthUnitOfWork for DbAuthUnitOfWork {
    async fn commit_registration(
        &self,
        registration: &Registration,
    ) -> Result<(), AuthServiceError> {
        let registration = registration.clone();
        self.db
            .transaction::<_, (), AuthServiceError>(move |txn| {
                Box::pin(async move {
                    insert_identity(txn, &registration.identity)
                        .await
                        .map_err(|e| write_error(e, "insert user"))?;
                    insert_credential(txn, &registration.credential)
                        .await
                        .map_err(|e| write_error(e, "insert account"))?;
                    insert_verification(txn, &registration.verification)
                        .await
                        .map_err(|e| write_error(e, "insert verification"))?;
                    insert_session(txn, &registration.session)
                        .await
                        .map_err(|e| write_error(e, "insert session"))?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| from_transaction_error(e, "commit registration"))
    }

    async fn commit_email_verification(
        &self,
        identity_id: Uuid,
        verification: &Verification,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        let identifier = verification.identifier.clone();
        let value = verification.value.clone();
        self.db
            .transaction::<_, (), AuthServiceError>(move |txn| {
                Box::pin(async move {
                    // Deleting the presented row takes its lock; a concurrent
                    // commit of the same token sees 0 rows here.
                    let consumed = verifications::Entity::delete_many()
                        .filter(verifications::Column::Identifier.eq(identifier.as_str()))
                        .filter(verifications::Column::Value.eq(value.as_str()))
                        .exec(txn)
                        .await
                        .context("consume verification")?;
                    if consumed.rows_affected == 0 {
                        return Err(AuthServiceError::InvalidToken);
                    }

                    let updated = users::Entity::update_many()
                        .col_expr(users::Column::EmailVerified, Expr::value(true))
                        .col_expr(users::Column::UpdatedAt, Expr::value(now))
                        .filter(users::Column::Id.eq(identity_id))
                        .filter(users::Column::EmailVerified.eq(false))
                        .exec(txn)
                        .await
                        .context("mark email verified")?;
                    if updated.rows_affected == 0 {
                        let exists = users::Entity::find_by_id(identity_id)
                            .one(txn)
                            .await
                            .context("find user by id")?
                            .is_some();
                        return Err(if exists {
                            AuthServiceError::InvalidToken
                        } else {
                            AuthServiceError::NotFound
                        });
                    }

                    delete_verifications(txn, &identifier)
                        .await
                        .context("delete verifications")?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| from_transaction_error(e, "commit email verification"))
    }
}
