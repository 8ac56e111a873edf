use axum::Json;

use flocky_auth_types::identity::CurrentIdentity;

/// `GET /auth/me`: the identity the resolver attached. Anonymous requests are
/// rejected with 401 by the extractor.
pub async fn me(identity: CurrentIdentity) -> Json<CurrentIdentity> {
    Json(identity)
}
