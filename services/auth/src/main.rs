use std::net::SocketAddr;

use sea_orm::Database;
use tracing::info;

use flocky_auth::config::AuthConfig;
use flocky_auth::infra::sweeper::spawn_session_sweeper;
use flocky_auth::router::build_router;
use flocky_auth::state::AppState;
use flocky_core::config::Config;
use flocky_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        cors_allowed_origins: config.cors_origins(),
        trust_forwarded_for: config.trust_forwarded_for,
    };

    match config.session_sweep_interval() {
        Some(every) => {
            spawn_session_sweeper(state.session_repo(), every);
        }
        None => info!("expired-session sweeper disabled"),
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
