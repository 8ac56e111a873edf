use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// Every variant except `Internal` is a client-correctable condition and is
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email already in use")]
    Conflict,
    /// Shared by unknown email and wrong password so callers cannot tell them apart.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid verification token")]
    InvalidToken,
    #[error("verification token has expired")]
    ExpiredToken,
    #[error("user not found")]
    NotFound,
    #[error("{}", .0.join(", "))]
    ValidationFailed(Vec<String>),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conflict => "CONFLICT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::NotFound => "USER_NOT_FOUND",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::ExpiredToken | Self::ValidationFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        // TraceLayer already records method/uri/status for every request, so
        // 4xx are not logged again. Internal errors carry the anyhow chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
