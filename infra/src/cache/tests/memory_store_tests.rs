use std::time::Duration;

use crate::cache::InMemoryEphemeralStore;
use th_core::services::verification::EphemeralStore;

#[tokio::test]
async fn test_put_get_delete() {
    let store = InMemoryEphemeralStore::new();
    assert!(store.is_empty().await);

    store.put("phone_verification_1", "123456", 300).await.unwrap();
    assert_eq!(
        store.get("phone_verification_1").await.unwrap(),
        Some("123456".to_string())
    );

    store.delete("phone_verification_1").await.unwrap();
    assert_eq!(store.get("phone_verification_1").await.unwrap(), None);

    // Deleting a missing key is a no-op
    store.delete("phone_verification_1").await.unwrap();
}

#[tokio::test]
async fn test_put_overwrites_and_resets_ttl() {
    tokio::time::pause();
    let store = InMemoryEphemeralStore::new();

    store.put("email_verification_1", "first", 10).await.unwrap();
    tokio::time::advance(Duration::from_secs(8)).await;
    store.put("email_verification_1", "second", 10).await.unwrap();
    tokio::time::advance(Duration::from_secs(8)).await;

    assert_eq!(
        store.get("email_verification_1").await.unwrap(),
        Some("second".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_read_as_missing() {
    let store = InMemoryEphemeralStore::new();
    store.put("phone_verification_2", "654321", 300).await.unwrap();

    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(store.get("phone_verification_2").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(store.get("phone_verification_2").await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_clones_share_entries() {
    let store = InMemoryEphemeralStore::new();
    let other = store.clone();

    store.put("phone_verification_3", "000123", 60).await.unwrap();
    assert_eq!(other.len().await, 1);
    assert_eq!(
        other.get("phone_verification_3").await.unwrap(),
        Some("000123".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_put_sweeps_unread_expired_entries() {
    let store = InMemoryEphemeralStore::new();
    store.put("phone_verification_4", "111111", 60).await.unwrap();
    store.put("email_verification_4", "token", 600).await.unwrap();

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(store.len().await, 2);

    store.put("phone_verification_5", "222222", 60).await.unwrap();
    assert_eq!(store.len().await, 2);
    assert_eq!(store.get("phone_verification_4").await.unwrap(), None);
    assert!(store.get("email_verification_4").await.unwrap().is_some());
}
