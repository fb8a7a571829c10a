//! Single-document storage.
//!
//! Handles the widget layout, global styles and per-user settings, each
//! stored as one JSON object under its own key.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sitedeck_core::models::{
    GLOBAL_STYLES_KEY, GlobalStyles, UserSettings, WIDGET_LAYOUT_KEY, Widget, default_widgets,
    user_settings_key,
};
use sitedeck_core::types::UserId;

use super::{KeyValueStore, RepositoryError, Store};

/// Get a stored document.
///
/// # Errors
///
/// Returns [`RepositoryError::Corrupt`] if the stored JSON does not parse.
pub async fn get_document<D: DeserializeOwned>(
    store: &Store,
    key: &str,
) -> Result<Option<D>, RepositoryError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| RepositoryError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Set a document, replacing any previous value.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn set_document<D: Serialize + Sync>(
    store: &Store,
    key: &str,
    value: &D,
) -> Result<(), RepositoryError> {
    let raw = serde_json::to_string(value).map_err(|source| RepositoryError::Serialize {
        key: key.to_string(),
        source,
    })?;
    let _guard = store.lock_writes().await;
    store.put(key, raw).await
}

/// Load a document (or its default), apply `f`, and save it under the write
/// lock. Nothing is written when `f` fails.
///
/// # Errors
///
/// Returns the error from `f`, or a storage error converted into `E`.
pub async fn update_document<D, R, E>(
    store: &Store,
    key: &str,
    default: impl FnOnce() -> D + Send,
    f: impl FnOnce(&mut D) -> Result<R, E> + Send,
) -> Result<R, E>
where
    D: Serialize + DeserializeOwned + Send + Sync,
    R: Send,
    E: From<RepositoryError> + Send,
{
    let _guard = store.lock_writes().await;
    let mut document = get_document(store, key).await?.unwrap_or_else(default);
    let result = f(&mut document)?;
    let raw = serde_json::to_string(&document).map_err(|source| RepositoryError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.put(key, raw).await?;
    Ok(result)
}

/// Widget layout, falling back to the default layout.
///
/// # Errors
///
/// Returns an error if the stored layout cannot be read.
pub async fn widget_layout(store: &Store) -> Result<Vec<Widget>, RepositoryError> {
    Ok(get_document(store, WIDGET_LAYOUT_KEY)
        .await?
        .unwrap_or_else(default_widgets))
}

/// Global styles, falling back to the defaults.
///
/// # Errors
///
/// Returns an error if the stored styles cannot be read.
pub async fn global_styles(store: &Store) -> Result<GlobalStyles, RepositoryError> {
    Ok(get_document(store, GLOBAL_STYLES_KEY)
        .await?
        .unwrap_or_default())
}

/// Settings for one user, falling back to the defaults.
///
/// # Errors
///
/// Returns an error if the stored settings cannot be read.
pub async fn user_settings(store: &Store, user_id: &UserId) -> Result<UserSettings, RepositoryError> {
    Ok(get_document(store, &user_settings_key(user_id))
        .await?
        .unwrap_or_default())
}
