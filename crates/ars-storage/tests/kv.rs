use serde::{Deserialize, Serialize};

use ars_storage::kv::{KeyValueStore, MemoryStore};
use ars_storage::state::{load_state, load_state_or_default, save_state};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Counter {
    turns: u32,
    last: Option<String>,
}

#[tokio::test]
async fn set_get_delete() {
    let store = MemoryStore::new();
    assert_eq!(store.get("session-8031234567").await.unwrap(), None);

    store
        .set("session-8031234567", "{}".to_string())
        .await
        .unwrap();
    assert_eq!(
        store.get("session-8031234567").await.unwrap().as_deref(),
        Some("{}")
    );

    store.delete("session-8031234567").await.unwrap();
    assert!(store.is_empty().await);
    // Deleting again is fine.
    store.delete("session-8031234567").await.unwrap();
}

#[tokio::test]
async fn json_state_round_trips_through_the_store() {
    let store = MemoryStore::new();
    let value = Counter {
        turns: 3,
        last: Some("1".to_string()),
    };
    save_state(&store, "counter", &value).await.unwrap();

    let loaded: Option<Counter> = load_state(&store, "counter").await.unwrap();
    assert_eq!(loaded, Some(value));

    let missing: Counter = load_state_or_default(&store, "other").await.unwrap();
    assert_eq!(missing, Counter::default());
}

#[tokio::test]
async fn corrupt_state_is_a_serialization_error() {
    let store = MemoryStore::new();
    store.set("counter", "not json".to_string()).await.unwrap();
    let err = load_state::<Counter, _>(&store, "counter").await.unwrap_err();
    assert!(matches!(
        err,
        ars_storage::error::StorageError::Serialization(_)
    ));
}

#[tokio::test]
async fn works_behind_a_trait_object() {
    let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    save_state(store.as_ref(), "flag", &"on").await.unwrap();
    let flag: Option<String> = load_state(store.as_ref(), "flag").await.unwrap();
    assert_eq!(flag.as_deref(), Some("on"));
}
