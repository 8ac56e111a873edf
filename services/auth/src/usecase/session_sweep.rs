use chrono::{DateTime, Utc};

use crate::domain::repository::SessionRepository;
use crate::error::AuthServiceError;

pub struct PurgeExpiredSessionsUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> PurgeExpiredSessionsUseCase<S> {
    /// Delete every session whose expiry is at or before `now`.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError> {
        self.sessions.delete_expired(now).await
    }
}
