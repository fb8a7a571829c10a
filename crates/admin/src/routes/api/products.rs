//! Product ordering.

use axum::{Json, Router, extract::State, routing::post};
use sitedeck_core::models::Product;
use tracing::instrument;

use super::ReorderRequest;
use crate::{db::CollectionRepository, error::AppError, state::AppState};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/reorder", post(reorder))
}

/// Persist a new product order and return the reordered list.
///
/// # Errors
///
/// Returns 400 if the ids or indices do not fit the stored list; the stored
/// order is unchanged in that case.
#[instrument(skip(state))]
pub async fn reorder(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = CollectionRepository::<Product>::new(state.store())
        .mutate(|collection| {
            request.apply(collection)?;
            Ok::<_, AppError>(collection.items().to_vec())
        })
        .await?;

    tracing::info!(count = products.len(), "products reordered");
    Ok(Json(products))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use sitedeck_core::models::ProductDraft;
    use sitedeck_core::{Collection, Record};
    use tower::ServiceExt;

    use crate::config::AdminConfig;
    use crate::db::Store;

    use super::*;

    async fn seeded() -> (Store, Vec<String>) {
        let store = Store::memory();
        let products: Vec<Product> = ["Croissant", "Baguette", "Scone"]
            .into_iter()
            .map(|name| {
                Product::from_draft(
                    Product::new_id(),
                    ProductDraft {
                        name: name.to_string(),
                        category: "Bakery".to_string(),
                        ..ProductDraft::default()
                    },
                    Utc::now(),
                )
            })
            .collect();
        let ids = products.iter().map(|p| p.id.to_string()).collect();
        CollectionRepository::new(&store)
            .save(&Collection::new(products))
            .await
            .unwrap();
        (store, ids)
    }

    async fn post_reorder(store: &Store, body: String) -> StatusCode {
        let app = router().with_state(AppState::new(AdminConfig::default(), store.clone()));
        let request = Request::post("/api/products/reorder")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    async fn stored_ids(store: &Store) -> Vec<String> {
        CollectionRepository::<Product>::new(store)
            .load()
            .await
            .unwrap()
            .ids()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_drag_persists_visual_order() {
        let (store, ids) = seeded().await;
        let status = post_reorder(&store, r#"{"from":0,"to":2}"#.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            stored_ids(&store).await,
            [ids[1].clone(), ids[2].clone(), ids[0].clone()]
        );
    }

    #[tokio::test]
    async fn test_full_id_order() {
        let (store, ids) = seeded().await;
        let wanted = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];
        let body = serde_json::json!({ "ids": wanted }).to_string();
        assert_eq!(post_reorder(&store, body).await, StatusCode::OK);
        assert_eq!(stored_ids(&store).await, wanted);
    }

    #[tokio::test]
    async fn test_bad_reorder_is_rejected_without_changes() {
        let (store, ids) = seeded().await;
        let status = post_reorder(&store, r#"{"from":0,"to":7}"#.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = serde_json::json!({ "ids": [&ids[0], &ids[0], &ids[1]] }).to_string();
        assert_eq!(post_reorder(&store, body).await, StatusCode::BAD_REQUEST);
        assert_eq!(stored_ids(&store).await, ids);
    }
}
