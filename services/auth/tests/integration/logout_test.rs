use chrono::Utc;

use flocky_auth::usecase::logout::LogoutUseCase;

use crate::helpers::{MemoryStore, PASSWORD, login_input, login_usecase, register};

#[tokio::test]
async fn should_delete_only_the_presented_session() {
    let store = MemoryStore::new();
    let registered = register(&store, "a@x.com", Utc::now()).await;
    let second = login_usecase(&store)
        .execute(login_input("a@x.com", PASSWORD), Utc::now())
        .await
        .unwrap();

    LogoutUseCase {
        sessions: store.clone(),
    }
    .execute(&registered.token)
    .await
    .unwrap();

    let state = store.state();
    assert_eq!(state.sessions.len(), 1);
    assert_eq!(state.sessions[0].token, second.token);
}

#[tokio::test]
async fn should_succeed_for_unknown_or_repeated_tokens() {
    let store = MemoryStore::new();
    let registered = register(&store, "a@x.com", Utc::now()).await;
    let usecase = LogoutUseCase {
        sessions: store.clone(),
    };

    usecase.execute("never-issued").await.unwrap();
    usecase.execute(&registered.token).await.unwrap();
    usecase.execute(&registered.token).await.unwrap();

    assert!(store.state().sessions.is_empty());
}
