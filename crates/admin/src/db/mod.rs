//! Local JSON storage for the dashboard.
//!
//! # Keys
//!
//! Every value is a JSON document stored under a string key:
//!
//! - `posts`, `products`, `sales`, `testimonials`, `teamMembers`,
//!   `profiles`, `users`, `sitePages` - whole collections as JSON arrays
//! - `dashboardWidgets` - widget layout
//! - `globalStyles` - site-wide styles
//! - `userSettings.<user_id>` - per-user preferences
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used by tests and demos
//! - [`FileStore`] - one `<key>.json` file per key under a data directory
//!
//! Writers take the [`Store`] write lock for the whole load, mutate and save
//! cycle, so concurrent requests never lose each other's updates.

pub mod collections;
pub mod file;
pub mod memory;
pub mod settings;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

pub use collections::CollectionRepository;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::StorageConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing storage failed.
    #[error("storage error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not valid JSON for the expected type.
    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters that cannot be stored.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Async string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: String) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// All stored keys, sorted.
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}

/// Check that a key is safe to use as a file name.
///
/// Keys are ASCII letters, digits, `.`, `_` and `-`, and never start with a
/// dot.
///
/// # Errors
///
/// Returns [`RepositoryError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), RepositoryError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidKey(key.to_string()))
    }
}

#[derive(Debug, Clone)]
enum Backend {
    Memory(MemoryStore),
    File(FileStore),
}

/// The configured storage backend plus the shared write lock.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Backend,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    /// Fresh, empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::with_backend(Backend::Memory(MemoryStore::new()))
    }

    /// File-backed store rooted at `data_dir`.
    #[must_use]
    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(Backend::File(FileStore::new(data_dir.into())))
    }

    /// Build the store described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if the data directory cannot be created.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, RepositoryError> {
        match config {
            StorageConfig::Memory => Ok(Self::memory()),
            StorageConfig::File { data_dir } => {
                tokio::fs::create_dir_all(data_dir)
                    .await
                    .map_err(|source| RepositoryError::Io {
                        key: data_dir.display().to_string(),
                        source,
                    })?;
                Ok(Self::file(data_dir.clone()))
            }
        }
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Memory(_) => "memory",
            Backend::File(_) => "file",
        }
    }

    /// Serialize writers. Hold the guard across the whole read-modify-write.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

impl KeyValueStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match &self.backend {
            Backend::Memory(store) => store.get(key).await,
            Backend::File(store) => store.get(key).await,
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        match &self.backend {
            Backend::Memory(store) => store.put(key, value).await,
            Backend::File(store) => store.put(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        match &self.backend {
            Backend::Memory(store) => store.delete(key).await,
            Backend::File(store) => store.delete(key).await,
        }
    }

    async fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        match &self.backend {
            Backend::Memory(store) => store.keys().await,
            Backend::File(store) => store.keys().await,
        }
    }
}
