use crate::domain::repository::SessionRepository;
use crate::error::AuthServiceError;

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    /// Idempotent: an unknown or already-deleted token is still `Ok`.
    pub async fn execute(&self, token: &str) -> Result<(), AuthServiceError> {
        self.sessions.delete_by_token(token).await
    }
}
