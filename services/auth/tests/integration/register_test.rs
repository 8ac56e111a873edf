use chrono::{Duration, Utc};
use uuid::Uuid;

use flocky_auth::domain::password::verify_password;
use flocky_auth::domain::types::{CREDENTIALS_PROVIDER, Credential};
use flocky_auth::error::AuthServiceError;

use crate::helpers::{MemoryStore, PASSWORD, register_input, register_usecase};

#[tokio::test]
async fn should_register_unverified_identity_with_session() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let out = register_usecase(&store)
        .execute(register_input("a@x.com", "Ann"), now)
        .await
        .unwrap();

    assert_eq!(out.user.email, "a@x.com");
    assert_eq!(out.user.name, "Ann");
    assert!(!out.user.email_verified);
    assert_eq!(out.token.len(), 43);
    assert_eq!(out.expires_at, now + Duration::days(30));

    let state = store.state();
    assert_eq!(state.identities.len(), 1);
    assert_eq!(state.identities[0].id, out.user.id);

    let session = &state.sessions[0];
    assert_eq!(session.token, out.token);
    assert_eq!(session.user_id, out.user.id);
    assert_eq!(session.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(session.user_agent.as_deref(), Some("flocky-tests/1.0"));
}

#[tokio::test]
async fn should_store_argon2_hash_under_credentials_provider() {
    let store = MemoryStore::new();
    let out = register_usecase(&store)
        .execute(register_input("a@x.com", "Ann"), Utc::now())
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.credentials.len(), 1);
    let credential = &state.credentials[0];
    assert_eq!(credential.user_id, out.user.id);
    assert_eq!(credential.provider, CREDENTIALS_PROVIDER);
    assert_eq!(credential.provider_account_id, "a@x.com");

    let hash = credential.password_hash.as_deref().unwrap();
    assert_ne!(hash, PASSWORD);
    assert!(hash.starts_with("$argon2id$"));
    assert!(verify_password(PASSWORD, hash));
}

#[tokio::test]
async fn should_issue_verification_valid_for_24_hours() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let out = register_usecase(&store)
        .execute(register_input("a@x.com", "Ann"), now)
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.verifications.len(), 1);
    let verification = &state.verifications[0];
    assert_eq!(verification.identifier, "a@x.com");
    assert_eq!(verification.expires_at, now + Duration::hours(24));
    assert_eq!(verification.value.len(), 43);
    assert_ne!(verification.value, out.token);
}

#[tokio::test]
async fn should_reject_duplicate_email_with_conflict() {
    let store = MemoryStore::new();
    let usecase = register_usecase(&store);
    usecase
        .execute(register_input("a@x.com", "Ann"), Utc::now())
        .await
        .unwrap();

    let result = usecase
        .execute(register_input("a@x.com", "Another Ann"), Utc::now())
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::Conflict)),
        "expected Conflict, got {result:?}"
    );

    let state = store.state();
    assert_eq!(state.identities.len(), 1);
    assert_eq!(state.identities[0].name, "Ann");
    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.verifications.len(), 1);
}

#[tokio::test]
async fn should_write_nothing_when_commit_conflicts() {
    let store = MemoryStore::new();
    // A stray credential for the email with no identity: the lookup passes,
    // the commit's uniqueness check does not.
    store.state().credentials.push(Credential::password(
        Uuid::now_v7(),
        "a@x.com",
        "not-a-hash".to_owned(),
        Utc::now(),
    ));

    let result = register_usecase(&store)
        .execute(register_input("a@x.com", "Ann"), Utc::now())
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::Conflict)),
        "expected Conflict, got {result:?}"
    );

    let state = store.state();
    assert!(state.identities.is_empty());
    assert!(state.sessions.is_empty());
    assert!(state.verifications.is_empty());
    assert_eq!(state.credentials.len(), 1);
}
