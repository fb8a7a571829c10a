use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{KeyValueStore, RepositoryError, validate_key};

/// In-memory store for tests and throwaway demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        validate_key(key)?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        validate_key(key)?;
        Ok(self.values.write().await.remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.values.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        assert!(store.get("sales").await.unwrap().is_none());

        store.put("sales", "[1]".to_string()).await.unwrap();
        store.put("sales", "[2]".to_string()).await.unwrap();
        assert_eq!(store.get("sales").await.unwrap().as_deref(), Some("[2]"));

        assert!(store.delete("sales").await.unwrap());
        assert!(!store.delete("sales").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.put("b", "1".to_string()).await.unwrap();
        store.put("a", "2".to_string()).await.unwrap();
        assert_eq!(other.keys().await.unwrap(), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        let err = store.put("../x", String::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidKey(_)));
    }
}
