//! Bearer-token request helpers.
//!
//! Routes behind the session resolver read `Authorization: Bearer <token>`.
//! `MockAuth` builds that header (or a deliberately broken variant) so tests
//! do not hand-assemble header strings.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

/// Authorization header value to attach to a test request.
pub enum MockAuth {
    Bearer(String),
    /// A raw header value, for malformed-header cases.
    Raw(&'static str),
}

impl MockAuth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub fn header_value(&self) -> HeaderValue {
        match self {
            Self::Bearer(token) => HeaderValue::from_str(&format!("Bearer {token}"))
                .expect("test token must be a valid header value"),
            Self::Raw(raw) => HeaderValue::from_static(raw),
        }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}
