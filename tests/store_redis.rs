//! Tests against a live Redis. Run with:
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379 cargo test --test store_redis -- --ignored
//! ```

use basket_api::infrastructure::store::{BasketStore, RedisBasketStore, StoreError};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

async fn connect(prefix: &str) -> RedisBasketStore {
    let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set for Redis tests");
    RedisBasketStore::connect(&url, prefix, TIMEOUT)
        .await
        .expect("Failed to connect to Redis")
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_set_get_delete() {
    let store = connect("basket-test:crud:").await;

    store
        .set("cart-1", b"payload", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(
        store.get("cart-1").await.unwrap(),
        Some(b"payload".to_vec())
    );

    store.delete("cart-1").await.unwrap();
    assert_eq!(store.get("cart-1").await.unwrap(), None);

    // Deleting a missing key is not an error
    store.delete("cart-1").await.unwrap();
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_set_applies_ttl() {
    let store = connect("basket-test:ttl:").await;

    store
        .set("cart-1", b"payload", Duration::from_secs(120))
        .await
        .unwrap();

    let ttl = store.remaining_ttl("cart-1").await.unwrap().unwrap();
    assert!(ttl <= Duration::from_secs(120));
    assert!(ttl >= Duration::from_secs(110));

    store.delete("cart-1").await.unwrap();
    assert_eq!(store.remaining_ttl("cart-1").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_read_does_not_renew_ttl() {
    let store = connect("basket-test:read:").await;

    store
        .set("cart-1", b"payload", Duration::from_secs(3))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    store.get("cart-1").await.unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(store.get("cart-1").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_prefixes_isolate_keys() {
    let a = connect("basket-test:a:").await;
    let b = connect("basket-test:b:").await;

    a.set("cart-1", b"from-a", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(b.get("cart-1").await.unwrap(), None);

    a.delete("cart-1").await.unwrap();
}

#[tokio::test]
#[ignore = "requires REDIS_URL"]
async fn test_ping() {
    let store = connect("basket-test:").await;
    assert!(store.ping().await);
}

#[tokio::test]
async fn test_connect_to_unreachable_redis_fails() {
    // Port 1 is reserved and never has a Redis listening
    let result =
        RedisBasketStore::connect("redis://127.0.0.1:1", "basket:", Duration::from_millis(500))
            .await;

    assert!(matches!(
        result,
        Err(StoreError::Unavailable(_) | StoreError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_connect_with_invalid_url_fails() {
    let result = RedisBasketStore::connect("not-a-url", "basket:", TIMEOUT).await;

    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
