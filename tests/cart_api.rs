//! Integration tests for the cart HTTP API
//!
//! These tests drive the full router and verify:
//! - Catalog listing
//! - Cart mutations and derived totals
//! - Adding catalog products by id
//! - The cart event stream
//! - Error handling

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures_util::StreamExt;
use serde_json::{json, Value};

use cart_store::cart::models::Product;
use cart_store::cart::AppState;
use cart_store::catalog::Catalog;
use cart_store::router::create_app_router;
use tower::util::ServiceExt; // for `oneshot`

/// Helper function to create a test app instance with a two-product catalog
fn create_test_app() -> axum::Router {
    let catalog = Catalog::from_products(vec![
        Product::new("apple", "Apple", 0.5),
        Product::new("bread", "Bread", 2.25),
    ])
    .unwrap();
    create_app_router(AppState::new(catalog).shared())
}

/// Helper function to send a request and get the JSON response
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

#[tokio::test]
async fn test_catalog_listing() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["id"], "apple");
    assert_eq!(products[1]["price"], 2.25);
}

#[tokio::test]
async fn test_empty_cart() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/cart", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalPrice"], 0.0);
    assert_eq!(body["itemCount"], 0);
    assert_eq!(body["summary"], "");
}

#[tokio::test]
async fn test_cart_scenario() {
    let app = create_test_app();

    let a = json!({ "id": "a", "name": "Alpha", "price": 10 });
    let b = json!({ "id": "b", "name": "Beta", "price": "5" });

    send_request(&app, "POST", "/cart/items", Some(a.clone())).await;
    send_request(&app, "POST", "/cart/items", Some(b)).await;
    let (status, body) = send_request(&app, "POST", "/cart/items", Some(a)).await;

    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "a");
    assert_eq!(items[0]["quantity"], 2);
    assert!(items[0]["price"].is_u64());
    assert_eq!(items[0]["price"], 10);
    assert_eq!(items[1]["id"], "b");
    assert_eq!(items[1]["quantity"], 1);
    assert_eq!(items[1]["price"], "5");
    assert_eq!(body["totalPrice"], 25.0);
    assert_eq!(body["itemCount"], 3);
    assert_eq!(body["summary"], "2x Alpha, 1x Beta");

    let (_, body) =
        send_request(&app, "PUT", "/cart/items/b", Some(json!({ "quantity": 0 }))).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["itemCount"], 2);
    assert_eq!(body["totalPrice"], 20.0);

    let (status, body) = send_request(&app, "DELETE", "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalPrice"], 0.0);
    assert_eq!(body["itemCount"], 0);
}

#[tokio::test]
async fn test_update_and_remove() {
    let app = create_test_app();

    send_request(&app, "POST", "/cart/items/bread", None).await;
    let (_, body) =
        send_request(&app, "PUT", "/cart/items/bread", Some(json!({ "quantity": 4 }))).await;
    assert_eq!(body["items"][0]["quantity"], 4);
    assert_eq!(body["totalPrice"], 9.0);

    // Unknown ids are no-ops
    let (status, body) = send_request(&app, "DELETE", "/cart/items/nothing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemCount"], 4);

    let (_, body) = send_request(&app, "DELETE", "/cart/items/bread", None).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_add_from_catalog() {
    let app = create_test_app();

    send_request(&app, "POST", "/cart/items/apple", None).await;
    let (status, body) = send_request(&app, "POST", "/cart/items/apple", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["name"], "Apple");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["totalPrice"], 1.0);
}

#[tokio::test]
async fn test_add_unknown_catalog_product() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "POST", "/cart/items/durian", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("durian"));
}

#[tokio::test]
async fn test_invalid_payloads() {
    let app = create_test_app();

    let (status, body) =
        send_request(&app, "POST", "/cart/items", Some(json!({ "name": "No id" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send_request(
        &app,
        "PUT",
        "/cart/items/apple",
        Some(json!({ "quantity": "many" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_event_stream() {
    let state = AppState::new(Catalog::empty()).shared();
    let app = create_app_router(state.clone());

    state.cart.add_item(Product::new("a", "Alpha", 3.0));

    let request = Request::builder()
        .method("GET")
        .uri("/cart/events")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "text/event-stream");

    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: cart"));
    assert!(first.contains("\"itemCount\":1"));

    state.cart.update_quantity("a", 5);

    let second = frames.next().await.unwrap().unwrap();
    let second = String::from_utf8(second.to_vec()).unwrap();
    assert!(second.contains("\"itemCount\":5"));
    assert!(second.contains("\"totalPrice\":15.0"));
}
