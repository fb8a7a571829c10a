//! Storage maintenance: check, export and reset.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use sitedeck_admin::db::{
    CollectionRepository, KeyValueStore, RepositoryError, Store, settings, validate_key,
};
use sitedeck_core::Record;
use sitedeck_core::models::{
    BlogPost, GLOBAL_STYLES_KEY, GlobalStyles, Page, Product, Profile, Sale, TeamMember,
    Testimonial, User, UserSettings, WIDGET_LAYOUT_KEY, Widget,
};

const USER_SETTINGS_PREFIX: &str = "userSettings.";

/// Keys holding whole collections.
pub const COLLECTION_KEYS: [&str; 8] = [
    BlogPost::COLLECTION_KEY,
    Product::COLLECTION_KEY,
    Sale::COLLECTION_KEY,
    Testimonial::COLLECTION_KEY,
    TeamMember::COLLECTION_KEY,
    Profile::COLLECTION_KEY,
    User::COLLECTION_KEY,
    Page::COLLECTION_KEY,
];

#[derive(Debug, Error)]
pub enum StorageCommandError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("nothing stored under {0}")]
    Missing(String),

    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether the dashboard owns `key`.
#[must_use]
pub fn is_known_key(key: &str) -> bool {
    COLLECTION_KEYS.contains(&key)
        || key == WIDGET_LAYOUT_KEY
        || key == GLOBAL_STYLES_KEY
        || key.starts_with(USER_SETTINGS_PREFIX)
}

/// Describe the value under a known key, loading it with its real type.
async fn load_known(store: &Store, key: &str) -> Result<String, RepositoryError> {
    async fn count<T: Record>(store: &Store) -> Result<String, RepositoryError> {
        let collection = CollectionRepository::<T>::new(store).load().await?;
        Ok(format!("{} record(s)", collection.len()))
    }

    match key {
        k if k == BlogPost::COLLECTION_KEY => count::<BlogPost>(store).await,
        k if k == Product::COLLECTION_KEY => count::<Product>(store).await,
        k if k == Sale::COLLECTION_KEY => count::<Sale>(store).await,
        k if k == Testimonial::COLLECTION_KEY => count::<Testimonial>(store).await,
        k if k == TeamMember::COLLECTION_KEY => count::<TeamMember>(store).await,
        k if k == Profile::COLLECTION_KEY => count::<Profile>(store).await,
        k if k == User::COLLECTION_KEY => count::<User>(store).await,
        k if k == Page::COLLECTION_KEY => count::<Page>(store).await,
        WIDGET_LAYOUT_KEY => settings::get_document::<Vec<Widget>>(store, key)
            .await
            .map(|widgets| format!("{} widget(s)", widgets.map_or(0, |w| w.len()))),
        GLOBAL_STYLES_KEY => settings::get_document::<GlobalStyles>(store, key)
            .await
            .map(|_| "styles".to_string()),
        _ => settings::get_document::<UserSettings>(store, key)
            .await
            .map(|_| "user settings".to_string()),
    }
}

/// Load every stored key and log the ones that fail. Returns the failure count.
///
/// # Errors
///
/// Returns an error only if the key listing itself fails.
pub async fn check(store: &Store) -> Result<usize, RepositoryError> {
    let mut problems = 0;
    for key in store.keys().await? {
        if !is_known_key(&key) {
            warn!(%key, "Unrecognised key, skipping");
            continue;
        }
        match load_known(store, &key).await {
            Ok(summary) => info!(%key, %summary, "ok"),
            Err(e) => {
                warn!(%key, error = %e, "Failed to load");
                problems += 1;
            }
        }
    }

    info!(problems, "Check complete");
    Ok(problems)
}

/// Write the pretty-printed JSON under `key` to `file`.
///
/// # Errors
///
/// Returns an error if the key is invalid or empty, or the file cannot be
/// written.
pub async fn export(store: &Store, key: &str, file: &Path) -> Result<(), StorageCommandError> {
    validate_key(key)?;
    let raw = store
        .get(key)
        .await?
        .ok_or_else(|| StorageCommandError::Missing(key.to_string()))?;

    // Pretty-print valid JSON; export anything else untouched so it can be repaired
    let output = serde_json::from_str::<serde_json::Value>(&raw)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or(raw);

    tokio::fs::write(file, output)
        .await
        .map_err(|source| StorageCommandError::Write {
            path: file.display().to_string(),
            source,
        })?;

    info!(%key, file = %file.display(), "Exported");
    Ok(())
}

/// Delete `key`, or every known key when `None`. Returns how many were deleted.
///
/// # Errors
///
/// Returns an error if the key is invalid or storage fails.
pub async fn reset(store: &Store, key: Option<&str>) -> Result<usize, RepositoryError> {
    let targets = match key {
        Some(key) => {
            validate_key(key)?;
            vec![key.to_string()]
        }
        None => store
            .keys()
            .await?
            .into_iter()
            .filter(|key| is_known_key(key))
            .collect(),
    };

    let _guard = store.lock_writes().await;
    let mut deleted = 0;
    for key in &targets {
        if store.delete(key).await? {
            info!(%key, "Deleted");
            deleted += 1;
        } else {
            warn!(%key, "Nothing stored");
        }
    }
    Ok(deleted)
}
