use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAuthUnitOfWork, DbCredentialRepository, DbIdentityRepository, DbSessionRepository,
    DbVerificationRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cors_allowed_origins: Vec<String>,
    /// See `AuthConfig::trust_forwarded_for`.
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn identity_repo(&self) -> DbIdentityRepository {
        DbIdentityRepository {
            db: self.db.clone(),
        }
    }

    pub fn credential_repo(&self) -> DbCredentialRepository {
        DbCredentialRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn verification_repo(&self) -> DbVerificationRepository {
        DbVerificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn unit_of_work(&self) -> DbAuthUnitOfWork {
        DbAuthUnitOfWork {
            db: self.db.clone(),
        }
    }
}
