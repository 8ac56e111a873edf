//! Bearer-token session resolution.
//!
//! Runs in front of every `/auth` route. A live session attaches a
//! [`CurrentIdentity`] to the request extensions; anything else leaves the
//! request anonymous. Rejection is left to the handlers.

use axum::{
    extract::{Request, State},
    http::{Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use flocky_auth_types::{bearer::bearer_token, identity::CurrentIdentity};

use crate::domain::repository::SessionRepository;
use crate::error::AuthServiceError;
use crate::state::AppState;

/// Resolve the identity for a request.
///
/// An identity already present in `extensions` wins. A missing or malformed
/// header, an unknown token and an expired session all resolve to `None`.
/// Store failures propagate.
pub async fn resolve_identity<S: SessionRepository>(
    headers: &HeaderMap,
    extensions: &Extensions,
    sessions: &S,
    now: DateTime<Utc>,
) -> Result<Option<CurrentIdentity>, AuthServiceError> {
    if let Some(existing) = extensions.get::<CurrentIdentity>() {
        return Ok(Some(existing.clone()));
    }
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };
    let found = sessions.find_by_token(&token).await?;
    Ok(found
        .filter(|f| f.session.is_active_at(now))
        .map(|f| f.identity.into()))
}

pub async fn attach_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthServiceError> {
    let resolved = resolve_identity(
        request.headers(),
        request.extensions(),
        &state.session_repo(),
        Utc::now(),
    )
    .await?;
    if let Some(identity) = resolved {
        request.extensions_mut().insert(identity);
    }
    Ok(next.run(request).await)
}
