//! Request/response helpers for driving a router with `tower::ServiceExt::oneshot`.

use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header::CONTENT_TYPE};

use crate::auth::MockAuth;

/// Build a request with an optional JSON body and authorization header.
pub fn request(
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    auth: Option<&MockAuth>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(axum::http::header::AUTHORIZATION, auth.header_value());
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid test request")
}

/// Read a response body as JSON. Returns `Value::Null` for an empty body.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON body")
}
