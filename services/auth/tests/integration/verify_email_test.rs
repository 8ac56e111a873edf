use chrono::{Duration, Utc};

use flocky_auth::domain::repository::AuthUnitOfWork;
use flocky_auth::domain::types::Verification;
use flocky_auth::error::AuthServiceError;
use flocky_auth::usecase::verify_email::{VerifyEmailInput, VerifyEmailUseCase};

use crate::helpers::{
    MemoryStore, PASSWORD, login_input, login_usecase, register, verification_value,
};

fn usecase(store: &MemoryStore) -> VerifyEmailUseCase<MemoryStore, MemoryStore, MemoryStore> {
    VerifyEmailUseCase {
        identities: store.clone(),
        verifications: store.clone(),
        uow: store.clone(),
    }
}

fn input(identifier: &str, token: &str) -> VerifyEmailInput {
    VerifyEmailInput {
        identifier: identifier.to_owned(),
        token: token.to_owned(),
    }
}

#[tokio::test]
async fn should_verify_email_and_consume_token() {
    let store = MemoryStore::new();
    let registered_at = Utc::now();
    let out = register(&store, "a@x.com", registered_at).await;
    let value = verification_value(&store, "a@x.com");

    let verified_at = registered_at + Duration::hours(1);
    usecase(&store)
        .execute(input("a@x.com", &value), verified_at)
        .await
        .unwrap();

    {
        let state = store.state();
        let identity = state.identities.iter().find(|i| i.id == out.user.id).unwrap();
        assert!(identity.email_verified);
        assert_eq!(identity.updated_at, verified_at);
        assert!(state.verifications.iter().all(|v| v.identifier != "a@x.com"));
    }

    let replay = usecase(&store)
        .execute(input("a@x.com", &value), verified_at)
        .await;
    assert!(
        matches!(replay, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {replay:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let store = MemoryStore::new();
    register(&store, "a@x.com", Utc::now()).await;

    let result = usecase(&store)
        .execute(input("a@x.com", "not-the-token"), Utc::now())
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    assert!(!store.state().identities[0].email_verified);
}

#[tokio::test]
async fn should_reject_token_issued_for_another_identifier() {
    let store = MemoryStore::new();
    register(&store, "a@x.com", Utc::now()).await;
    register(&store, "b@x.com", Utc::now()).await;
    let value = verification_value(&store, "a@x.com");

    let result = usecase(&store)
        .execute(input("b@x.com", &value), Utc::now())
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_token() {
    let store = MemoryStore::new();
    let registered_at = Utc::now();
    register(&store, "a@x.com", registered_at).await;
    let value = verification_value(&store, "a@x.com");

    let result = usecase(&store)
        .execute(input("a@x.com", &value), registered_at + Duration::hours(25))
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::ExpiredToken)),
        "expected ExpiredToken, got {result:?}"
    );
    assert!(!store.state().identities[0].email_verified);
}

#[tokio::test]
async fn should_accept_token_at_its_expiry_instant() {
    let store = MemoryStore::new();
    let registered_at = Utc::now();
    register(&store, "a@x.com", registered_at).await;
    let value = verification_value(&store, "a@x.com");

    usecase(&store)
        .execute(input("a@x.com", &value), registered_at + Duration::hours(24))
        .await
        .unwrap();
    assert!(store.state().identities[0].email_verified);
}

#[tokio::test]
async fn should_report_missing_identity_as_not_found() {
    let store = MemoryStore::new();
    let now = Utc::now();
    store
        .state()
        .verifications
        .push(Verification::issue("ghost@x.com", "orphan".to_owned(), now));

    let result = usecase(&store)
        .execute(input("ghost@x.com", "orphan"), now)
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::NotFound)),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_show_verified_identity_on_next_login() {
    let store = MemoryStore::new();
    let registered = register(&store, "a@x.com", Utc::now()).await;
    assert!(!registered.user.email_verified);

    let value = verification_value(&store, "a@x.com");
    usecase(&store)
        .execute(input("a@x.com", &value), Utc::now())
        .await
        .unwrap();

    let out = login_usecase(&store)
        .execute(login_input("a@x.com", PASSWORD), Utc::now())
        .await
        .unwrap();
    assert_eq!(out.user.id, registered.user.id);
    assert_eq!(out.user.name, "Ann");
    assert!(out.user.email_verified);
    assert_ne!(out.token, registered.token);
}

#[tokio::test]
async fn should_invalidate_every_pending_token_for_the_identifier() {
    let store = MemoryStore::new();
    let now = Utc::now();
    register(&store, "a@x.com", now).await;
    register(&store, "b@x.com", now).await;
    let first = verification_value(&store, "a@x.com");
    store
        .state()
        .verifications
        .push(Verification::issue("a@x.com", "second-token".to_owned(), now));

    usecase(&store)
        .execute(input("a@x.com", &first), now)
        .await
        .unwrap();

    {
        let state = store.state();
        assert!(state.verifications.iter().all(|v| v.identifier != "a@x.com"));
        // Other identifiers keep their tokens.
        assert_eq!(state.verifications.len(), 1);
        assert_eq!(state.verifications[0].identifier, "b@x.com");
    }

    let second = usecase(&store)
        .execute(input("a@x.com", "second-token"), now)
        .await;
    assert!(
        matches!(second, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {second:?}"
    );
}

#[tokio::test]
async fn should_reject_live_token_for_already_verified_identity() {
    let store = MemoryStore::new();
    let now = Utc::now();
    register(&store, "a@x.com", now).await;
    store.state().identities[0].email_verified = true;
    let value = verification_value(&store, "a@x.com");

    let result = usecase(&store)
        .execute(input("a@x.com", &value), now)
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    assert_eq!(store.state().verifications.len(), 1);
}

#[tokio::test]
async fn should_fail_second_commit_of_the_same_token() {
    // Both callers read the row before either commits; the commit decides.
    let store = MemoryStore::new();
    let now = Utc::now();
    let out = register(&store, "a@x.com", now).await;
    let verification = store.state().verifications[0].clone();

    store
        .commit_email_verification(out.user.id, &verification, now)
        .await
        .unwrap();
    let second = store
        .commit_email_verification(out.user.id, &verification, now)
        .await;
    assert!(
        matches!(second, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {second:?}"
    );
    assert!(store.state().identities[0].email_verified);
}

#[tokio::test]
async fn should_report_identity_removed_before_commit_as_not_found() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let out = register(&store, "a@x.com", now).await;
    let verification = store.state().verifications[0].clone();
    store.state().identities.clear();

    let result = store
        .commit_email_verification(out.user.id, &verification, now)
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::NotFound)),
        "expected NotFound, got {result:?}"
    );
    // Nothing was consumed.
    assert_eq!(store.state().verifications.len(), 1);
}
