//! Sale status changes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use chrono::Utc;
use serde::Deserialize;
use sitedeck_core::models::Sale;
use sitedeck_core::{Record, SaleId, SaleStatus};
use tracing::instrument;

use crate::{db::CollectionRepository, error::AppError, state::AppState};

/// Build the sales router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/sales/{id}/status", put(update_status))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: SaleStatus,
}

/// Move a sale to another status.
///
/// # Errors
///
/// Returns 404 if no sale has the id.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Sale>, AppError> {
    let id = SaleId::from(id);
    let now = Utc::now();
    let sale = CollectionRepository::<Sale>::new(state.store())
        .mutate(|sales| {
            sales
                .replace(&id, |sale| {
                    sale.status = body.status;
                    sale.updated_at = now;
                    sale.clone()
                })
                .ok_or_else(|| AppError::not_found(Sale::LABEL, &id))
        })
        .await?;

    tracing::info!(%id, status = %sale.status, "sale status changed");
    Ok(Json(sale))
}
