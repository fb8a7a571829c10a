//! Integration tests for SiteDeck.
//!
//! Each test starts the full admin router on an ephemeral port with an
//! in-memory store and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sitedeck-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `collections` - create, list, filter, delete and validation
//! - `reorder` - drag reordering of products, sections and widgets
//! - `page_editor` - section blocks, cards and the page preview
//! - `media` - image uploads

use std::net::SocketAddr;

use reqwest::{Client, Response};
use serde_json::Value;
use sitedeck_admin::config::AdminConfig;
use sitedeck_admin::db::Store;
use sitedeck_admin::state::AppState;

/// A running admin server plus a handle on its store.
pub struct TestServer {
    pub client: Client,
    pub base_url: String,
    pub store: Store,
}

impl TestServer {
    /// Start a server with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::start_with(AdminConfig::default()).await
    }

    /// Start a server with the given configuration and a fresh memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_with(config: AdminConfig) -> Self {
        let store = Store::memory();
        let app = sitedeck_admin::app(AppState::new(config, store.clone()));

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            store,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails to send.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// Send `body` as JSON with `method` and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails to send.
    pub async fn send_json(&self, method: reqwest::Method, path: &str, body: &Value) -> Response {
        self.client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// POST `body` and decode the JSON response, asserting the status.
    ///
    /// # Panics
    ///
    /// Panics if the status differs or the body is not JSON.
    pub async fn post_ok(&self, path: &str, body: &Value) -> Value {
        let resp = self.send_json(reqwest::Method::POST, path, body).await;
        assert!(
            resp.status().is_success(),
            "POST {path} returned {}",
            resp.status()
        );
        resp.json().await.expect("Response was not JSON")
    }

    /// GET a JSON array.
    ///
    /// # Panics
    ///
    /// Panics if the response is not a JSON array.
    pub async fn list(&self, path: &str) -> Vec<Value> {
        let value: Value = self.get(path).await.json().await.expect("Response was not JSON");
        value.as_array().expect("Expected a JSON array").clone()
    }
}

/// Ids of a JSON array of records, in order.
#[must_use]
pub fn ids(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record["id"].as_str().map(str::to_string))
        .collect()
}
