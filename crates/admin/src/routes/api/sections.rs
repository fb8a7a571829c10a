//! Page section editor API.
//!
//! ```text
//! POST   /api/pages/{id}/sections                                  add section
//! POST   /api/pages/{id}/sections/reorder                          {from, to}
//! PUT    /api/pages/{id}/sections/{section_id}                     patch content
//! DELETE /api/pages/{id}/sections/{section_id}                     remove section
//! PUT    /api/pages/{id}/sections/{section_id}/blocks/{block}      {enabled}
//! POST   /api/pages/{id}/sections/{section_id}/cards               add card
//! PUT    /api/pages/{id}/sections/{section_id}/cards/{card_id}     update card
//! DELETE /api/pages/{id}/sections/{section_id}/cards/{card_id}     remove card
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use chrono::Utc;
use serde::Deserialize;
use sitedeck_core::editor::{Block, Card, CardDraft, Section, SectionDraft, SectionList, SectionPatch};
use sitedeck_core::models::Page;
use sitedeck_core::{CardId, PageId, Record, SectionId, Validate};
use tracing::instrument;

use crate::{db::CollectionRepository, error::AppError, state::AppState};

/// Build the section editor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pages/{id}/sections", post(add_section))
        .route("/api/pages/{id}/sections/reorder", post(reorder_sections))
        .route(
            "/api/pages/{id}/sections/{section_id}",
            put(update_section).delete(remove_section),
        )
        .route(
            "/api/pages/{id}/sections/{section_id}/blocks/{block}",
            put(toggle_block),
        )
        .route("/api/pages/{id}/sections/{section_id}/cards", post(add_card))
        .route(
            "/api/pages/{id}/sections/{section_id}/cards/{card_id}",
            put(update_card).delete(remove_card),
        )
}

#[derive(Debug, Deserialize)]
pub struct BlockToggle {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: usize,
    pub to: usize,
}

/// Run `f` against one stored page and save it, bumping `updated_at`.
async fn edit_page<R: Send>(
    state: &AppState,
    id: PageId,
    f: impl FnOnce(&mut Page) -> Result<R, AppError> + Send,
) -> Result<R, AppError> {
    CollectionRepository::<Page>::new(state.store())
        .mutate(|pages| {
            pages
                .replace(&id, |page| {
                    let result = f(page)?;
                    page.updated_at = Utc::now();
                    Ok(result)
                })
                .unwrap_or_else(|| Err(AppError::not_found(Page::LABEL, &id)))
        })
        .await
}

fn section_mut<'a>(page: &'a mut Page, id: &SectionId) -> Result<&'a mut Section, AppError> {
    page.section_mut(id)
        .ok_or_else(|| AppError::not_found("section", id))
}

/// Append a section to a page.
///
/// # Errors
///
/// Returns 422 for a blank name or 404 for an unknown page.
#[instrument(skip(state, draft))]
pub async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SectionDraft>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    draft.validate()?;
    let section = edit_page(&state, PageId::from(id), |page| {
        let section_id = page.add_section(draft);
        section_mut(page, &section_id).cloned()
    })
    .await?;

    tracing::info!(section_id = %section.id, "section added");
    Ok((StatusCode::CREATED, Json(section)))
}

/// Apply a partial content update to a section.
///
/// # Errors
///
/// Returns 422 for a blank name or 404 for an unknown page or section.
#[instrument(skip(state, patch))]
pub async fn update_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<Section>, AppError> {
    patch.validate()?;
    let section_id = SectionId::from(section_id);
    let section = edit_page(&state, PageId::from(id), |page| {
        let section = section_mut(page, &section_id)?;
        section.apply_content(patch);
        Ok(section.clone())
    })
    .await?;
    Ok(Json(section))
}

/// Remove a section from a page.
///
/// # Errors
///
/// Returns 404 for an unknown page or section.
#[instrument(skip(state))]
pub async fn remove_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let section_id = SectionId::from(section_id);
    edit_page(&state, PageId::from(id), |page| {
        if page.remove_section(&section_id) {
            Ok(())
        } else {
            Err(AppError::not_found("section", &section_id))
        }
    })
    .await?;

    tracing::info!(%section_id, "section removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Switch one block of a section on or off. Content is kept either way.
///
/// # Errors
///
/// Returns 400 for an unknown block name or 404 for an unknown page or section.
#[instrument(skip(state))]
pub async fn toggle_block(
    State(state): State<AppState>,
    Path((id, section_id, block)): Path<(String, String, String)>,
    Json(body): Json<BlockToggle>,
) -> Result<Json<Section>, AppError> {
    let block: Block = block.parse().map_err(AppError::BadRequest)?;
    let section_id = SectionId::from(section_id);
    let section = edit_page(&state, PageId::from(id), |page| {
        let section = section_mut(page, &section_id)?;
        section.set_block(block, body.enabled);
        Ok(section.clone())
    })
    .await?;
    Ok(Json(section))
}

/// Move a section to another position and return the new section order.
///
/// # Errors
///
/// Returns 400 if either index is out of range.
#[instrument(skip(state))]
pub async fn reorder_sections(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MoveRequest>,
) -> Result<Json<Vec<Section>>, AppError> {
    let sections = edit_page(&state, PageId::from(id), |page| {
        page.move_section(body.from, body.to)?;
        Ok(page.sections.clone())
    })
    .await?;
    Ok(Json(sections))
}

/// Append a card to a section.
///
/// # Errors
///
/// Returns 422 for a blank title or 404 for an unknown page or section.
#[instrument(skip(state, draft))]
pub async fn add_card(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(String, String)>,
    Json(draft): Json<CardDraft>,
) -> Result<(StatusCode, Json<Card>), AppError> {
    draft.validate()?;
    let section_id = SectionId::from(section_id);
    let card = edit_page(&state, PageId::from(id), |page| {
        let section = section_mut(page, &section_id)?;
        let card_id = section.add_card(draft);
        find_card(section, &card_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Replace a card's content.
///
/// # Errors
///
/// Returns 422 for a blank title or 404 for an unknown page, section or card.
#[instrument(skip(state, draft))]
pub async fn update_card(
    State(state): State<AppState>,
    Path((id, section_id, card_id)): Path<(String, String, String)>,
    Json(draft): Json<CardDraft>,
) -> Result<Json<Card>, AppError> {
    draft.validate()?;
    let section_id = SectionId::from(section_id);
    let card_id = CardId::from(card_id);
    let card = edit_page(&state, PageId::from(id), |page| {
        let section = section_mut(page, &section_id)?;
        if !section.update_card(&card_id, draft) {
            return Err(AppError::not_found("card", &card_id));
        }
        find_card(section, &card_id)
    })
    .await?;
    Ok(Json(card))
}

/// Remove a card from a section.
///
/// # Errors
///
/// Returns 404 for an unknown page, section or card.
#[instrument(skip(state))]
pub async fn remove_card(
    State(state): State<AppState>,
    Path((id, section_id, card_id)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    let section_id = SectionId::from(section_id);
    let card_id = CardId::from(card_id);
    edit_page(&state, PageId::from(id), |page| {
        if section_mut(page, &section_id)?.remove_card(&card_id) {
            Ok(())
        } else {
            Err(AppError::not_found("card", &card_id))
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn find_card(section: &Section, id: &CardId) -> Result<Card, AppError> {
    section
        .cards
        .iter()
        .find(|card| &card.id == id)
        .cloned()
        .ok_or_else(|| AppError::not_found("card", id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sitedeck_core::Collection;
    use sitedeck_core::models::PageDraft;
    use tower::ServiceExt;

    use crate::config::AdminConfig;
    use crate::db::Store;

    use super::*;

    async fn store_with_page() -> Store {
        let store = Store::memory();
        let page = Page::from_draft(
            PageId::from("home"),
            PageDraft {
                title: "Home".to_string(),
                ..PageDraft::default()
            },
            Utc::now(),
        );
        CollectionRepository::new(&store)
            .save(&Collection::new(vec![page]))
            .await
            .unwrap();
        store
    }

    async fn send(store: &Store, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = router().with_state(AppState::new(AdminConfig::default(), store.clone()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn stored_page(store: &Store) -> Page {
        CollectionRepository::<Page>::new(store)
            .load()
            .await
            .unwrap()
            .get(&PageId::from("home"))
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_block_toggle_preserves_content() {
        let store = store_with_page().await;
        let (status, section) = send(
            &store,
            "POST",
            "/api/pages/home/sections",
            json!({"name": "Hero", "blocks": ["title"]}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let base = format!("/api/pages/home/sections/{}", section["id"].as_str().unwrap());

        send(&store, "PUT", &base, json!({"title": "Fresh bread daily"})).await;
        let (_, off) = send(&store, "PUT", &format!("{base}/blocks/title"), json!({"enabled": false})).await;
        assert_eq!(off["has_title"], false);
        assert_eq!(off["title"], "Fresh bread daily");

        let (_, on) = send(&store, "PUT", &format!("{base}/blocks/title"), json!({"enabled": true})).await;
        assert_eq!(on["has_title"], true);
        assert_eq!(stored_page(&store).await.sections[0].title, "Fresh bread daily");
    }

    #[tokio::test]
    async fn test_unknown_block_and_section() {
        let store = store_with_page().await;
        let (status, _) = send(
            &store,
            "PUT",
            "/api/pages/home/sections/nope/blocks/title",
            json!({"enabled": true}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, section) = send(&store, "POST", "/api/pages/home/sections", json!({"name": "A"})).await;
        let uri = format!(
            "/api/pages/home/sections/{}/blocks/marquee",
            section["id"].as_str().unwrap()
        );
        let (status, _) = send(&store, "PUT", &uri, json!({"enabled": true})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&store, "POST", "/api/pages/missing/sections", json!({"name": "A"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reorder_and_remove_sections() {
        let store = store_with_page().await;
        for name in ["One", "Two", "Three"] {
            send(&store, "POST", "/api/pages/home/sections", json!({"name": name})).await;
        }

        let (status, sections) = send(
            &store,
            "POST",
            "/api/pages/home/sections/reorder",
            json!({"from": 2, "to": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sections[0]["name"], "Three");

        let (status, _) = send(
            &store,
            "POST",
            "/api/pages/home/sections/reorder",
            json!({"from": 0, "to": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let first = sections[0]["id"].as_str().unwrap().to_string();
        let (status, _) = send(
            &store,
            "DELETE",
            &format!("/api/pages/home/sections/{first}"),
            Value::Null,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let names: Vec<_> = stored_page(&store)
            .await
            .sections
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(names, ["One", "Two"]);
    }

    #[tokio::test]
    async fn test_card_lifecycle() {
        let store = store_with_page().await;
        let (_, section) = send(
            &store,
            "POST",
            "/api/pages/home/sections",
            json!({"name": "Menu", "blocks": ["cards"]}),
        )
        .await;
        let cards = format!(
            "/api/pages/home/sections/{}/cards",
            section["id"].as_str().unwrap()
        );

        let (status, _) = send(&store, "POST", &cards, json!({"title": " "})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, card) = send(&store, "POST", &cards, json!({"title": "Sourdough"})).await;
        assert_eq!(status, StatusCode::CREATED);
        let card_uri = format!("{cards}/{}", card["id"].as_str().unwrap());

        let (status, updated) = send(
            &store,
            "PUT",
            &card_uri,
            json!({"title": "Sourdough loaf", "description": "48h ferment"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["description"], "48h ferment");

        let (status, _) = send(&store, "DELETE", &card_uri, Value::Null).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&store, "DELETE", &card_uri, Value::Null).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(stored_page(&store).await.sections[0].cards.is_empty());
    }
}
