use std::sync::Arc;

use parley_persist::{HistoryRepository, KvStore, MemoryStore, PersistError, Turn};

fn alternating(n: usize) -> Vec<Turn> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Turn::user(format!("q{}", i))
            } else {
                Turn::assistant(format!("a{}", i))
            }
        })
        .collect()
}

#[tokio::test]
async fn test_load_absent_session_is_empty() {
    let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));
    assert!(repo.load("fresh").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_empty_value_is_empty() {
    let store = MemoryStore::with_entries([("session:s1", "")]);
    let repo = HistoryRepository::new(Arc::new(store));
    assert!(repo.load("s1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_corrupt_value() {
    let store = MemoryStore::with_entries([("session:s1", "{not json")]);
    let repo = HistoryRepository::new(Arc::new(store));

    let err = repo.load("s1").await.unwrap_err();
    assert!(err.is_history_corrupt());
    match err {
        PersistError::HistoryCorrupt { key, .. } => assert_eq!(key, "session:s1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_wrong_shape_is_corrupt() {
    let store = MemoryStore::with_entries([("session:s1", r#"{"role":"user","content":"x"}"#)]);
    let repo = HistoryRepository::new(Arc::new(store));
    assert!(repo.load("s1").await.unwrap_err().is_history_corrupt());
}

#[tokio::test]
async fn test_save_writes_json_array_under_session_key() {
    let store = Arc::new(MemoryStore::new());
    let repo = HistoryRepository::new(store.clone());

    let written = repo
        .save("s1", vec![Turn::user("Hi"), Turn::assistant("Hello!")])
        .await
        .unwrap();

    assert_eq!(written, 2);
    let raw = store.get("session:s1").await.unwrap().unwrap();
    assert_eq!(
        raw,
        r#"[{"role":"user","content":"Hi"},{"role":"assistant","content":"Hello!"}]"#
    );
}

#[tokio::test]
async fn test_save_caps_at_thirty_dropping_oldest() {
    let store = Arc::new(MemoryStore::new());
    let repo = HistoryRepository::new(store.clone());
    let history = alternating(31);

    let written = repo.save("s1", history.clone()).await.unwrap();
    let reloaded = repo.load("s1").await.unwrap();

    assert_eq!(written, 30);
    assert_eq!(reloaded, history[1..].to_vec());
}

#[tokio::test]
async fn test_custom_cap() {
    let repo = HistoryRepository::new(Arc::new(MemoryStore::new())).with_max_turns(4);
    repo.save("s1", alternating(10)).await.unwrap();

    let reloaded = repo.load("s1").await.unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[0].content, "q6");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let repo = HistoryRepository::new(Arc::new(MemoryStore::new()));
    repo.save("a", vec![Turn::user("for a")]).await.unwrap();

    assert!(repo.load("b").await.unwrap().is_empty());
    assert_eq!(repo.load("a").await.unwrap().len(), 1);
}
