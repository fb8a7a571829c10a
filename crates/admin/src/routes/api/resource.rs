//! Generic CRUD handlers shared by every collection.
//!
//! ```text
//! GET    {base}          list, optionally filtered with ?q=
//! POST   {base}          create from a draft
//! GET    {base}/{id}     read one
//! PUT    {base}/{id}     replace the editable fields
//! DELETE {base}/{id}     delete
//! ```

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use sitedeck_core::{Record, Validate};
use tracing::instrument;

use crate::{db::CollectionRepository, error::AppError, state::AppState};

/// Build the CRUD router for one record type mounted at `base`.
pub fn router<T: Record>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list::<T>).post(create::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(show::<T>).put(update::<T>).delete(destroy::<T>),
        )
}

/// Query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter.
    pub q: Option<String>,
}

/// List records in stored order.
///
/// # Errors
///
/// Returns an error if the collection cannot be loaded.
#[instrument(skip(state), fields(collection = T::COLLECTION_KEY))]
pub async fn list<T: Record>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<T>>, AppError> {
    let collection = CollectionRepository::<T>::new(state.store()).load().await?;
    let records = collection
        .filter(query.q.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(records))
}

/// Read one record.
///
/// # Errors
///
/// Returns 404 if no record has the id.
#[instrument(skip(state), fields(collection = T::COLLECTION_KEY))]
pub async fn show<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    let id = T::Id::from(id);
    let collection = CollectionRepository::<T>::new(state.store()).load().await?;
    collection
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(T::LABEL, &id))
}

/// Validate a draft and append the new record.
///
/// # Errors
///
/// Returns 422 if validation fails; nothing is stored in that case.
#[instrument(skip(state, draft), fields(collection = T::COLLECTION_KEY))]
pub async fn create<T: Record>(
    State(state): State<AppState>,
    Json(draft): Json<T::Draft>,
) -> Result<(StatusCode, Json<T>), AppError> {
    draft.validate()?;

    let record = T::from_draft(T::new_id(), draft, Utc::now());
    let created = record.clone();
    CollectionRepository::<T>::new(state.store())
        .mutate(move |collection| {
            collection.insert(record);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(id = %created.id(), "{} created", T::LABEL);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a record's editable fields.
///
/// # Errors
///
/// Returns 422 if validation fails or 404 if no record has the id.
#[instrument(skip(state, draft), fields(collection = T::COLLECTION_KEY))]
pub async fn update<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<T::Draft>,
) -> Result<Json<T>, AppError> {
    draft.validate()?;

    let id = T::Id::from(id);
    let now = Utc::now();
    let updated = CollectionRepository::<T>::new(state.store())
        .mutate(|collection| {
            collection
                .replace(&id, |record| {
                    record.apply(draft, now);
                    record.clone()
                })
                .ok_or_else(|| AppError::not_found(T::LABEL, &id))
        })
        .await?;

    tracing::info!(%id, "{} updated", T::LABEL);
    Ok(Json(updated))
}

/// Delete a record.
///
/// # Errors
///
/// Returns 404 if no record has the id.
#[instrument(skip(state), fields(collection = T::COLLECTION_KEY))]
pub async fn destroy<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = T::Id::from(id);
    CollectionRepository::<T>::new(state.store())
        .mutate(|collection| {
            collection
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| AppError::not_found(T::LABEL, &id))
        })
        .await?;

    tracing::info!(%id, "{} deleted", T::LABEL);
    Ok(StatusCode::NO_CONTENT)
}
