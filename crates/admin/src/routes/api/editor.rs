//! Rich-text editor embed configuration.

use axum::{Json, Router, extract::State, routing::get};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::state::AppState;

/// Build the editor router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/editor", get(editor_config))
}

/// What the post editor needs to boot the hosted rich-text widget.
#[derive(Debug, Serialize)]
pub struct EditorConfig {
    /// False when no key is configured; the client falls back to a textarea.
    pub enabled: bool,
    /// Client-side key. It is shipped to the browser by nature.
    pub api_key: Option<String>,
    pub plugins: &'static [&'static str],
    pub toolbar: &'static str,
    /// Endpoint the editor's file picker posts images to.
    pub upload_url: &'static str,
}

const PLUGINS: &[&str] = &["link", "lists", "image", "table", "code", "wordcount"];
const TOOLBAR: &str =
    "undo redo | blocks | bold italic underline | bullist numlist | link image | code";

pub async fn editor_config(State(state): State<AppState>) -> Json<EditorConfig> {
    let api_key = state
        .config()
        .editor_api_key
        .as_ref()
        .map(|key| key.expose_secret().to_string());
    Json(EditorConfig {
        enabled: api_key.is_some(),
        api_key,
        plugins: PLUGINS,
        toolbar: TOOLBAR,
        upload_url: "/api/media",
    })
}
