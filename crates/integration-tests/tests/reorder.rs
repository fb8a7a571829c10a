//! Drag reordering persists the final visual order.

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use sitedeck_admin::db::{CollectionRepository, settings};
use sitedeck_core::models::{Page, Product};
use sitedeck_integration_tests::{TestServer, ids};

async fn seed_products(server: &TestServer, names: &[&str]) -> Vec<String> {
    let mut created = Vec::new();
    for name in names {
        let product = server
            .post_ok("/api/products", &json!({"name": name, "category": "Bakery"}))
            .await;
        created.push(product["id"].as_str().unwrap().to_string());
    }
    created
}

#[tokio::test]
async fn test_product_drag_is_persisted() {
    let server = TestServer::start().await;
    let original = seed_products(&server, &["A", "B", "C", "D"]).await;

    // Drag the last card to the front
    let resp = server
        .send_json(Method::POST, "/api/products/reorder", &json!({"from": 3, "to": 0}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let returned: Vec<Value> = resp.json().await.unwrap();

    let expected = [&original[3], &original[0], &original[1], &original[2]]
        .map(String::clone)
        .to_vec();
    assert_eq!(ids(&returned), expected);
    assert_eq!(ids(&server.list("/api/products").await), expected);

    let stored = CollectionRepository::<Product>::new(&server.store)
        .load()
        .await
        .unwrap();
    let stored_ids: Vec<String> = stored.ids().iter().map(ToString::to_string).collect();
    assert_eq!(stored_ids, expected);
}

#[tokio::test]
async fn test_product_order_by_ids() {
    let server = TestServer::start().await;
    let original = seed_products(&server, &["A", "B", "C"]).await;
    let wanted = vec![original[2].clone(), original[0].clone(), original[1].clone()];

    server
        .post_ok("/api/products/reorder", &json!({ "ids": wanted.clone() }))
        .await;
    assert_eq!(ids(&server.list("/api/products").await), wanted);
}

#[tokio::test]
async fn test_invalid_reorder_changes_nothing() {
    let server = TestServer::start().await;
    let original = seed_products(&server, &["A", "B"]).await;

    let resp = server
        .send_json(Method::POST, "/api/products/reorder", &json!({"from": 0, "to": 7}))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = server
        .send_json(
            Method::POST,
            "/api/products/reorder",
            &json!({"ids": [original[0].clone()]}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ids(&server.list("/api/products").await), original);
}

#[tokio::test]
async fn test_section_reorder_is_persisted() {
    let server = TestServer::start().await;
    let page = server.post_ok("/api/pages", &json!({"title": "Home"})).await;
    let page_id = page["id"].as_str().unwrap();

    for name in ["Hero", "Menu", "Contact"] {
        server
            .post_ok(&format!("/api/pages/{page_id}/sections"), &json!({"name": name}))
            .await;
    }

    server
        .post_ok(
            &format!("/api/pages/{page_id}/sections/reorder"),
            &json!({"from": 0, "to": 2}),
        )
        .await;

    let pages = CollectionRepository::<Page>::new(&server.store)
        .load()
        .await
        .unwrap();
    let names: Vec<&str> = pages.items()[0]
        .sections
        .iter()
        .map(|section| section.name.as_str())
        .collect();
    assert_eq!(names, ["Menu", "Contact", "Hero"]);
}

#[tokio::test]
async fn test_widget_layout_changes_are_persisted() {
    let server = TestServer::start().await;

    server
        .post_ok("/api/widgets/reorder", &json!({"from": 3, "to": 0}))
        .await;
    let resp = server
        .send_json(Method::PUT, "/api/widgets/latest-posts", &json!({"enabled": true}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let layout = settings::widget_layout(&server.store).await.unwrap();
    assert_eq!(layout[0].id.as_str(), "top-products");
    assert!(layout.iter().any(|w| w.id.as_str() == "latest-posts" && w.enabled));

    let resp = server
        .send_json(Method::PUT, "/api/widgets/weather", &json!({"enabled": true}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
