use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};

use crate::domain::types::ClientInfo;
use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client metadata recorded on a new session.
///
/// The IP is the peer address. `X-Forwarded-For` is client-controlled, so its
/// first hop is used only when `trust_forwarded` is set, which requires a
/// proxy in front that overwrites the header.
pub fn client_info(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded: bool,
) -> ClientInfo {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .filter(|_| trust_forwarded)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);
    let ip_address = forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()));
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    ClientInfo {
        ip_address,
        user_agent,
    }
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let info = client_info(&parts.headers, peer, state.trust_forwarded_for);
        async move { Ok(info) }
    }
}
