//! Dashboard widget layout API.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde::Deserialize;
use sitedeck_core::WidgetId;
use sitedeck_core::models::{WIDGET_LAYOUT_KEY, Widget, default_widgets};
use tracing::instrument;

use super::ReorderRequest;
use crate::{db::settings, error::AppError, state::AppState};

/// Build the widgets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/widgets", get(list_widgets))
        .route("/api/widgets/reorder", post(reorder_widgets))
        .route("/api/widgets/{id}", put(toggle_widget))
}

#[derive(Debug, Deserialize)]
pub struct WidgetToggle {
    pub enabled: bool,
}

/// Current layout, or the default layout if none was saved.
///
/// # Errors
///
/// Returns an error if the stored layout cannot be read.
#[instrument(skip(state))]
pub async fn list_widgets(State(state): State<AppState>) -> Result<Json<Vec<Widget>>, AppError> {
    Ok(Json(settings::widget_layout(state.store()).await?))
}

/// Enable or disable one widget.
///
/// # Errors
///
/// Returns 404 for an unknown widget id.
#[instrument(skip(state))]
pub async fn toggle_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<WidgetToggle>,
) -> Result<Json<Vec<Widget>>, AppError> {
    let id = WidgetId::from(id);
    let widgets = settings::update_document(
        state.store(),
        WIDGET_LAYOUT_KEY,
        default_widgets,
        |widgets: &mut Vec<Widget>| {
            let widget = widgets
                .iter_mut()
                .find(|widget| widget.id == id)
                .ok_or_else(|| AppError::not_found("widget", &id))?;
            widget.enabled = body.enabled;
            Ok::<_, AppError>(widgets.clone())
        },
    )
    .await?;

    tracing::info!(%id, enabled = body.enabled, "widget toggled");
    Ok(Json(widgets))
}

/// Rearrange widgets by full id order or a single drag.
///
/// # Errors
///
/// Returns 400 if the ids or indices do not fit the layout.
#[instrument(skip(state))]
pub async fn reorder_widgets(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<Widget>>, AppError> {
    let widgets = settings::update_document(
        state.store(),
        WIDGET_LAYOUT_KEY,
        default_widgets,
        |widgets: &mut Vec<Widget>| {
            request.apply_to(widgets, |widget| &widget.id)?;
            Ok::<_, AppError>(widgets.clone())
        },
    )
    .await?;
    Ok(Json(widgets))
}
