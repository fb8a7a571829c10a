//! Global styles and per-user settings API.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use sitedeck_core::models::{GLOBAL_STYLES_KEY, GlobalStyles, UserSettings, user_settings_key};
use sitedeck_core::{UserId, Validate};
use tracing::instrument;

use crate::{
    db::{self, settings},
    error::AppError,
    state::AppState,
};

/// Build the preferences router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/styles", get(get_styles).put(save_styles))
        .route(
            "/api/settings/{user_id}",
            get(get_user_settings).put(save_user_settings),
        )
}

/// Global styles, or the defaults if none were saved.
///
/// # Errors
///
/// Returns an error if the stored document cannot be read.
#[instrument(skip(state))]
pub async fn get_styles(State(state): State<AppState>) -> Result<Json<GlobalStyles>, AppError> {
    Ok(Json(settings::global_styles(state.store()).await?))
}

/// Replace the global styles.
///
/// # Errors
///
/// Returns 422 if the styles are invalid.
#[instrument(skip(state))]
pub async fn save_styles(
    State(state): State<AppState>,
    Json(styles): Json<GlobalStyles>,
) -> Result<Json<GlobalStyles>, AppError> {
    styles.validate()?;
    settings::set_document(state.store(), GLOBAL_STYLES_KEY, &styles).await?;
    tracing::info!("global styles saved");
    Ok(Json(styles))
}

/// One user's settings, or the defaults.
///
/// # Errors
///
/// Returns 400 if the user id cannot be used as a storage key.
#[instrument(skip(state))]
pub async fn get_user_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserSettings>, AppError> {
    let user_id = checked_user_id(user_id)?;
    Ok(Json(settings::user_settings(state.store(), &user_id).await?))
}

/// Replace one user's settings.
///
/// # Errors
///
/// Returns 422 if the settings are invalid or 400 for an unusable user id.
#[instrument(skip(state))]
pub async fn save_user_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(user_settings): Json<UserSettings>,
) -> Result<Json<UserSettings>, AppError> {
    let user_id = checked_user_id(user_id)?;
    user_settings.validate()?;
    settings::set_document(state.store(), &user_settings_key(&user_id), &user_settings).await?;
    tracing::info!(%user_id, "user settings saved");
    Ok(Json(user_settings))
}

fn checked_user_id(user_id: String) -> Result<UserId, AppError> {
    let user_id = UserId::from(user_id);
    db::validate_key(&user_settings_key(&user_id))
        .map_err(|_| AppError::BadRequest(format!("invalid user id: {user_id}")))?;
    Ok(user_id)
}
