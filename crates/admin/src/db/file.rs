//! Filesystem-backed store.
//!
//! ```text
//! <data_dir>/
//! ├── posts.json
//! ├── sitePages.json
//! └── userSettings.<user_id>.json
//! ```
//!
//! Writes go to a sibling `.tmp` file that is renamed over the target, so a
//! crash mid-write leaves the previous value intact.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::{KeyValueStore, RepositoryError, validate_key};

const EXTENSION: &str = "json";

/// One JSON file per key under a data directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, RepositoryError> {
        validate_key(key)?;
        Ok(self.base.join(format!("{key}.{EXTENSION}")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> RepositoryError {
    RepositoryError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let path = self.value_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        let path = self.value_path(key)?;
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        tokio::fs::create_dir_all(&self.base)
            .await
            .map_err(|e| io_error(key, e))?;
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| io_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error(key, e))
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        let path = self.value_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        let base = self.base.display().to_string();
        let mut entries = match tokio::fs::read_dir(&self.base).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&base, e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&base, e))? {
            let name = entry.file_name();
            let Some(key) = name
                .to_str()
                .and_then(|name| name.strip_suffix(".json"))
            else {
                continue;
            };
            if validate_key(key).is_ok() {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path().to_path_buf())
            .put("products", r#"[{"id":"p1"}]"#.to_string())
            .await
            .unwrap();

        let reopened = FileStore::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get("products").await.unwrap().as_deref(),
            Some(r#"[{"id":"p1"}]"#)
        );
        assert!(dir.path().join("products.json").is_file());
    }

    #[tokio::test]
    async fn test_missing_key_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent"));
        assert!(store.get("posts").await.unwrap().is_none());
        assert!(store.keys().await.unwrap().is_empty());
        assert!(!store.delete("posts").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_skip_temp_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.put("sales", "[]".to_string()).await.unwrap();
        store.put("globalStyles", "{}".to_string()).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("posts.json.tmp"), "x").unwrap();

        assert_eq!(store.keys().await.unwrap(), ["globalStyles", "sales"]);
    }

    #[tokio::test]
    async fn test_path_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        let err = store.get("../secrets").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidKey(_)));
    }
}
