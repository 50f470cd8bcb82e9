#![allow(clippy::unwrap_used)]
// Integration tests for `StoreClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shoply_api::{CategoryPayload, Error, ProductPayload, StoreClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, StoreClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = StoreClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn electronics() -> serde_json::Value {
    json!({ "id": 1, "name": "Electronics" })
}

// ── Product tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 7,
            "name": "Mechanical Keyboard",
            "price": 89.99,
            "totalItemsInStock": 12,
            "imageUrl": "https://img.example/kb.jpg",
            "category": electronics()
        },
        {
            "id": 8,
            "name": "Notebook",
            "price": 3.50,
            "totalItemsInStock": 0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Mechanical Keyboard");
    assert_eq!(products[0].category_name(), Some("Electronics"));
    assert!(products[0].in_stock());
    assert_eq!(products[1].category, None);
    assert!(!products[1].in_stock());
}

#[tokio::test]
async fn test_create_product_sends_payload() {
    let (server, client) = setup().await;

    let payload = ProductPayload {
        name: "Desk Lamp".into(),
        price: 24.0,
        total_items_in_stock: 5,
        category_id: 1,
        image_url: None,
    };

    // imageUrl is omitted when absent, not serialized as null.
    let expected_body = json!({
        "name": "Desk Lamp",
        "price": 24.0,
        "totalItemsInStock": 5,
        "categoryId": 1
    });

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": "Desk Lamp",
            "price": 24.0,
            "totalItemsInStock": 5,
            "category": electronics()
        })))
        .mount(&server)
        .await;

    let created = client.create_product(&payload).await.unwrap();
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn test_update_product() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Desk Lamp XL",
            "price": 29.0,
            "totalItemsInStock": 3,
            "category": electronics()
        })))
        .mount(&server)
        .await;

    let payload = ProductPayload {
        name: "Desk Lamp XL".into(),
        price: 29.0,
        total_items_in_stock: 3,
        category_id: 1,
        image_url: None,
    };

    let updated = client.update_product(42, &payload).await.unwrap();
    assert_eq!(updated.name, "Desk Lamp XL");
}

#[tokio::test]
async fn test_delete_product_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_product(42).await.unwrap();
}

#[tokio::test]
async fn test_get_product_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_product(999).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::NotFound { path } => assert_eq!(path, "/api/products/999"),
        other => panic!("expected NotFound error, got: {other:?}"),
    }
}

// ── Category tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_category() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({ "name": "Books" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "name": "Books"
        })))
        .mount(&server)
        .await;

    let category = client
        .create_category(&CategoryPayload { name: "Books".into() })
        .await
        .unwrap();

    assert_eq!(category.id, 3);
    assert_eq!(category.name, "Books");
}

#[tokio::test]
async fn test_delete_category_referenced_by_products() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("category is referenced by products"),
        )
        .mount(&server)
        .await;

    let err = client.delete_category(1).await.unwrap_err();

    assert!(err.is_rejection());
    assert_eq!(err.status(), Some(409));
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("referenced"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Dashboard tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_get_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalProducts": 12,
            "totalValue": 1043.75,
            "totalItemsInStock": 240,
            "categories": [electronics(), { "id": 2, "name": "Fashion" }]
        })))
        .mount(&server)
        .await;

    let stats = client.get_stats().await.unwrap();

    assert_eq!(stats.total_products, 12);
    assert_eq!(stats.total_items_in_stock, 240);
    assert_eq!(stats.categories.len(), 2);
    assert_eq!(stats.categories[1].name, "Fashion");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_carries_body_preview() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_products().await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_products().await;

    match result {
        Err(Error::Deserialization { ref message, ref body }) => {
            assert!(message.contains("body preview"), "message: {message}");
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
