use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use flocky_core::{
    health::{healthz, readyz},
    middleware::{propagate_request_id_layer, request_id_layer},
};

use crate::handlers::{
    auth::{login, logout, register, verify_email},
    me::me,
};
use crate::middleware::attach_identity;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/me", get(me))
        .route_layer(from_fn_with_state(state.clone(), attach_identity));

    let cors = cors_layer(&state.cors_allowed_origins);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(auth)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    // Origins that are not valid header values are dropped.
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
