//! Record lifecycle over HTTP: create, list, filter, delete and validation.

use reqwest::{Method, StatusCode};
use serde_json::json;
use sitedeck_admin::db::CollectionRepository;
use sitedeck_core::models::{Product, Testimonial};
use sitedeck_integration_tests::{TestServer, ids};

#[tokio::test]
async fn test_created_record_is_persisted() {
    let server = TestServer::start().await;

    let created = server
        .post_ok(
            "/api/products",
            &json!({"name": "Sourdough Loaf", "price": {"amount": "7.50"}, "category": "Bread"}),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let listed = server.list("/api/products").await;
    assert_eq!(ids(&listed), [id]);

    let stored = CollectionRepository::<Product>::new(&server.store)
        .load()
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.items()[0].id.as_str(), id);
}

#[tokio::test]
async fn test_delete_removes_from_storage() {
    let server = TestServer::start().await;
    let keep = server
        .post_ok("/api/testimonials", &json!({"name": "Priya", "content": "Great bread"}))
        .await;
    let gone = server
        .post_ok("/api/testimonials", &json!({"name": "Lukas", "content": "Fast delivery"}))
        .await;

    let resp = server
        .client
        .delete(server.url(&format!("/api/testimonials/{}", gone["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let listed = server.list("/api/testimonials").await;
    assert_eq!(ids(&listed), [keep["id"].as_str().unwrap()]);

    let stored = CollectionRepository::<Testimonial>::new(&server.store)
        .load()
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_filter_is_case_insensitive_and_clears() {
    let server = TestServer::start().await;
    for (name, description) in [
        ("Butter Croissant", "Laminated by hand"),
        ("Rye Loaf", "Dense and dark, with BUTTERMILK"),
        ("Bakery Apron", "Heavy cotton"),
    ] {
        server
            .post_ok(
                "/api/products",
                &json!({"name": name, "description": description, "category": "Shop"}),
            )
            .await;
    }

    let hits = server.list("/api/products?q=butter").await;
    assert_eq!(hits.len(), 2);

    let none = server.list("/api/products?q=pretzel").await;
    assert!(none.is_empty());

    let all = server.list("/api/products?q=").await;
    assert_eq!(all.len(), 3);
    assert_eq!(server.list("/api/products").await.len(), 3);
}

#[tokio::test]
async fn test_missing_required_field_leaves_collection_untouched() {
    let server = TestServer::start().await;
    server
        .post_ok("/api/products", &json!({"name": "Scone", "category": "Pastry"}))
        .await;

    let resp = server
        .send_json(Method::POST, "/api/products", &json!({"name": "  ", "category": "Pastry"}))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["field"], "name");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let stored = CollectionRepository::<Product>::new(&server.store)
        .load()
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_update_unknown_record_is_404() {
    let server = TestServer::start().await;
    let resp = server
        .send_json(
            Method::PUT,
            "/api/users/nobody",
            &json!({"name": "Ghost", "email": "ghost@example.com"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sale_status_change() {
    let server = TestServer::start().await;
    let sale = server
        .post_ok(
            "/api/sales",
            &json!({
                "customer_name": "Ana Souza",
                "customer_email": "ana@example.com",
                "items": [{"name": "Cinnamon Bun", "quantity": 2, "price": {"amount": "4.00"}}]
            }),
        )
        .await;
    assert_eq!(sale["status"], "pending");
    assert!(sale["order_number"].as_str().unwrap().starts_with("ORD-"));

    let resp = server
        .send_json(
            Method::PUT,
            &format!("/api/sales/{}/status", sale["id"].as_str().unwrap()),
            &json!({"status": "completed"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = server.get("/").await.text().await.unwrap();
    assert!(html.contains("$8.00"));
}

#[tokio::test]
async fn test_sale_with_unrepresentable_total_is_rejected() {
    let server = TestServer::start().await;
    let sale = |price: &str| {
        json!({
            "customer_name": "Ana",
            "customer_email": "ana@example.com",
            "items": [{"name": "Vault", "quantity": 2, "price": {"amount": price}}]
        })
    };

    let resp = server
        .send_json(Method::POST, "/api/sales", &sale("79228162514264337593543950335"))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["field"], "items");
    assert_eq!(body["error"], "total is too large");

    let resp = server
        .send_json(Method::POST, "/api/sales", &sale("-50.00"))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(server.list("/api/sales").await.is_empty());
}
