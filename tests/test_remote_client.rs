//! HttpCatalogClient against an in-memory fake of the remote catalog.

mod common;

use catalog_admin::{CatalogRemote, ProductDraft, RequestFailure};
use common::{product, remote_client, Upstream};
use reqwest::StatusCode;

fn cap() -> ProductDraft {
    ProductDraft {
        title: "New Cap".to_string(),
        price: 10.0,
        description: "d".to_string(),
        category: "hats".to_string(),
        image: String::new(),
    }
}

#[tokio::test]
async fn lists_products_and_categories() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, _server) = Upstream::seeded().spawn().await;
    let client = remote_client(&base_url);

    let products = client.list().await?;
    assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(products[0].rating.as_ref().map(|r| r.count), Some(10));

    let categories = client.categories().await?;
    assert_eq!(categories, vec!["hats", "shoes"]);
    Ok(())
}

#[tokio::test]
async fn category_with_spaces_is_encoded() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = Upstream::with_products(vec![
        product(1, "Slim Fit Tee", 22.3, "men's clothing"),
        product(2, "Gold Ring", 168.0, "jewelery"),
    ]);
    let (base_url, _server) = upstream.spawn().await;
    let client = remote_client(&base_url);

    let clothing = client.list_by_category("men's clothing").await?;
    assert_eq!(clothing.len(), 1);
    assert_eq!(clothing[0].title, "Slim Fit Tee");
    Ok(())
}

#[tokio::test]
async fn create_update_delete_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = Upstream::seeded();
    let (base_url, _server) = upstream.clone().spawn().await;
    let client = remote_client(&base_url);

    let created = client.create(&cap()).await?;
    assert_eq!(created.id, 3);
    assert_eq!(created.rating, None);

    let mut draft = cap();
    draft.price = 12.0;
    let updated = client.update(3, &draft).await?;
    assert_eq!(updated.price, 12.0);

    let deleted = client.delete(3).await?;
    assert_eq!(deleted.id, 3);
    assert_eq!(upstream.product_count(), 2);
    Ok(())
}

#[tokio::test]
async fn non_success_status_becomes_request_failure() {
    let upstream = Upstream::seeded();
    let (base_url, _server) = upstream.clone().spawn().await;
    let client = remote_client(&base_url);

    upstream.fail(true);
    let err = client.delete(2).await.unwrap_err();
    match &err {
        RequestFailure::Status { operation, status } => {
            assert_eq!(*operation, "delete product");
            assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
        }
        other => panic!("unexpected failure: {other:?}"),
    }
    assert_eq!(err.reason(), Some("Service Unavailable"));
}

#[tokio::test]
async fn missing_record_is_a_failure_too() {
    let (base_url, _server) = Upstream::seeded().spawn().await;
    let client = remote_client(&base_url);

    let err = client.delete(404).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_remote_is_a_transport_failure() {
    // Nothing listens on the discard port.
    let client = remote_client("http://127.0.0.1:9");
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, RequestFailure::Transport { .. }));
    assert_eq!(err.operation(), "list products");
}
