use chrono::{Duration, Utc};
use uuid::Uuid;

use flocky_auth::domain::types::{ClientInfo, Session};
use flocky_auth::usecase::session_sweep::PurgeExpiredSessionsUseCase;

use crate::helpers::{FailingSessions, MemoryStore};

fn session_expiring_at(token: &str, expires_at: chrono::DateTime<Utc>) -> Session {
    let mut session = Session::issue(
        Uuid::now_v7(),
        token.to_owned(),
        ClientInfo::default(),
        expires_at - Duration::days(30),
    );
    session.expires_at = expires_at;
    session
}

#[tokio::test]
async fn should_delete_only_expired_sessions() {
    let store = MemoryStore::new();
    let now = Utc::now();
    {
        let mut state = store.state();
        state.sessions.push(session_expiring_at("old", now - Duration::hours(1)));
        state.sessions.push(session_expiring_at("boundary", now));
        state.sessions.push(session_expiring_at("live", now + Duration::seconds(1)));
    }

    let purged = PurgeExpiredSessionsUseCase {
        sessions: store.clone(),
    }
    .execute(now)
    .await
    .unwrap();

    assert_eq!(purged, 2);
    let state = store.state();
    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.sessions[0].token, "live");
}

#[tokio::test]
async fn should_report_zero_when_nothing_expired() {
    let store = MemoryStore::new();
    let now = Utc::now();
    store
        .state()
        .sessions
        .push(session_expiring_at("live", now + Duration::days(1)));

    let purged = PurgeExpiredSessionsUseCase { sessions: store }
        .execute(now)
        .await
        .unwrap();
    assert_eq!(purged, 0);
}

#[tokio::test]
async fn should_surface_store_failures() {
    let result = PurgeExpiredSessionsUseCase {
        sessions: FailingSessions,
    }
    .execute(Utc::now())
    .await;
    assert!(result.is_err());
}
