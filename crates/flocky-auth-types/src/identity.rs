//! Request-scoped identity attached by the session resolver.

use axum::extract::FromRequestParts;
use http::request::Parts;
use serde::Serialize;
use uuid::Uuid;

use flocky_core::error::AppError;

/// The authenticated user behind a request.
///
/// The auth service's resolver inserts this into the request extensions when
/// the bearer token maps to a live session. Flat authentication only: there is
/// no role list.
///
/// As an extractor it rejects anonymous requests with 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares `fn -> impl Future + Send`; read the extension
    // synchronously so the returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<CurrentIdentity>().cloned();
        async move { identity.ok_or(AppError::Unauthorized) }
    }
}
