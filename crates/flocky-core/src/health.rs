use axum::http::StatusCode;

/// `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz`: ready to take traffic.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
