mod common;

use basket_api::domain::entities::{BasketItem, CustomerBasket};
use basket_api::domain::repositories::{BasketRepository, RepositoryError};
use basket_api::infrastructure::persistence::{BasketTtl, StoreBasketRepository};
use basket_api::infrastructure::store::InMemoryBasketStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

fn repo_with_ttl(seconds: u64) -> (StoreBasketRepository, Arc<InMemoryBasketStore>) {
    let store = Arc::new(InMemoryBasketStore::new());
    let repo = StoreBasketRepository::new(store.clone(), BasketTtl::from_secs(seconds));
    (repo, store)
}

fn sample_basket(id: &str) -> CustomerBasket {
    let mut basket = CustomerBasket::new(id);
    basket.delivery_method_id = Some(2);
    basket.shipping_price = Decimal::new(450, 2);
    basket
        .items
        .push(BasketItem::new("p1", "Widget", Decimal::new(1250, 2), 3));
    basket
}

#[tokio::test]
async fn test_update_and_get_basket() {
    let (repo, _store) = repo_with_ttl(60);

    let written = repo.update_basket(sample_basket("cart-1")).await.unwrap();
    assert_eq!(written, sample_basket("cart-1"));

    let read = repo.get_basket("cart-1").await.unwrap();
    assert_eq!(read, Some(sample_basket("cart-1")));
}

#[tokio::test]
async fn test_get_missing_basket() {
    let (repo, _store) = repo_with_ttl(60);

    let result = repo.get_basket("missing").await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_basket_is_idempotent() {
    let (repo, _store) = repo_with_ttl(60);
    repo.update_basket(sample_basket("cart-1")).await.unwrap();

    assert!(repo.delete_basket("cart-1").await.unwrap());
    assert!(repo.get_basket("cart-1").await.unwrap().is_none());
    assert!(repo.delete_basket("cart-1").await.unwrap());
}

#[tokio::test]
async fn test_update_rejects_invalid_basket_without_writing() {
    let (repo, store) = repo_with_ttl(60);

    let mut basket = sample_basket("cart-1");
    basket.items[0].quantity = 0;

    let result = repo.update_basket(basket).await;

    assert!(matches!(result, Err(RepositoryError::InvalidBasket(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_corrupt_payload_is_reported() {
    let (repo, store) = repo_with_ttl(60);
    common::seed_raw(&store, "cart-2", b"not json at all").await;

    let result = repo.get_basket("cart-2").await;

    match result {
        Err(RepositoryError::CorruptPayload { key, .. }) => assert_eq!(key, "cart-2"),
        other => panic!("expected CorruptPayload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_outage_is_reported() {
    let (repo, store) = repo_with_ttl(60);
    store.set_available(false);

    assert!(matches!(
        repo.get_basket("cart-3").await,
        Err(RepositoryError::StoreUnavailable(_))
    ));
    assert!(matches!(
        repo.update_basket(sample_basket("cart-3")).await,
        Err(RepositoryError::StoreUnavailable(_))
    ));
    assert!(matches!(
        repo.delete_basket("cart-3").await,
        Err(RepositoryError::StoreUnavailable(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_basket_expires_after_ttl() {
    let (repo, _store) = repo_with_ttl(60);
    repo.update_basket(sample_basket("cart-1")).await.unwrap();

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(repo.get_basket("cart-1").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(repo.get_basket("cart-1").await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reads_do_not_renew_ttl() {
    let (repo, _store) = repo_with_ttl(60);
    repo.update_basket(sample_basket("cart-1")).await.unwrap();

    tokio::time::advance(Duration::from_secs(40)).await;
    assert!(repo.get_basket("cart-1").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(repo.get_basket("cart-1").await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_writes_renew_ttl() {
    let (repo, store) = repo_with_ttl(60);
    repo.update_basket(sample_basket("cart-1")).await.unwrap();

    tokio::time::advance(Duration::from_secs(40)).await;
    repo.update_basket(sample_basket("cart-1")).await.unwrap();
    assert_eq!(
        store.remaining_ttl("cart-1").await,
        Some(Duration::from_secs(60))
    );

    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(repo.get_basket("cart-1").await.unwrap().is_some());
}
