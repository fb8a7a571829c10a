//! Whole-collection persistence.

use std::marker::PhantomData;

use sitedeck_core::{Collection, Record};

use super::{KeyValueStore, RepositoryError, Store};

/// Loads and saves one record type as a JSON array.
pub struct CollectionRepository<'a, T> {
    store: &'a Store,
    _record: PhantomData<T>,
}

impl<'a, T: Record> CollectionRepository<'a, T> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// The stored collection, or an empty one if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Corrupt`] if the stored JSON does not parse.
    pub async fn load(&self) -> Result<Collection<T>, RepositoryError> {
        let Some(raw) = self.store.get(T::COLLECTION_KEY).await? else {
            return Ok(Collection::default());
        };
        let items: Vec<T> =
            serde_json::from_str(&raw).map_err(|source| RepositoryError::Corrupt {
                key: T::COLLECTION_KEY.to_string(),
                source,
            })?;
        Ok(Collection::new(items))
    }

    /// Overwrite the stored collection.
    ///
    /// Callers that read before writing should use [`Self::mutate`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, collection: &Collection<T>) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(collection.items()).map_err(|source| {
            RepositoryError::Serialize {
                key: T::COLLECTION_KEY.to_string(),
                source,
            }
        })?;
        self.store.put(T::COLLECTION_KEY, raw).await
    }

    /// Load, apply `f`, and save, holding the store write lock throughout.
    ///
    /// Nothing is written when `f` returns an error.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a storage error converted into `E`.
    pub async fn mutate<R, E>(
        &self,
        f: impl FnOnce(&mut Collection<T>) -> Result<R, E> + Send,
    ) -> Result<R, E>
    where
        R: Send,
        E: From<RepositoryError> + Send,
    {
        let _guard = self.store.lock_writes().await;
        let mut collection = self.load().await?;
        let result = f(&mut collection)?;
        self.save(&collection).await?;
        Ok(result)
    }

    /// Remove the stored collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    pub async fn clear(&self) -> Result<bool, RepositoryError> {
        let _guard = self.store.lock_writes().await;
        self.store.delete(T::COLLECTION_KEY).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sitedeck_core::models::{TeamMember, TeamMemberDraft};

    use super::*;

    fn member(name: &str) -> TeamMember {
        TeamMember::from_draft(
            TeamMember::new_id(),
            TeamMemberDraft {
                name: name.to_string(),
                position: "Baker".to_string(),
                ..TeamMemberDraft::default()
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_missing_collection_loads_empty() {
        let store = Store::memory();
        let team = CollectionRepository::<TeamMember>::new(&store).load().await.unwrap();
        assert!(team.is_empty());
    }

    #[tokio::test]
    async fn test_mutate_persists_in_order() {
        let store = Store::memory();
        let repo = CollectionRepository::<TeamMember>::new(&store);

        for name in ["Ada", "Grace", "Linus"] {
            repo.mutate(|team| {
                team.insert(member(name));
                Ok::<_, RepositoryError>(())
            })
            .await
            .unwrap();
        }

        let names: Vec<_> = repo
            .load()
            .await
            .unwrap()
            .items()
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Linus"]);
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let store = Store::memory();
        let repo = CollectionRepository::<TeamMember>::new(&store);
        repo.save(&Collection::new(vec![member("Ada")])).await.unwrap();

        let result: Result<(), String> = repo
            .mutate(|team| {
                team.insert(member("Ghost"));
                Err("rejected".to_string())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(repo.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_json_is_reported() {
        let store = Store::memory();
        store.put("teamMembers", "{not json".to_string()).await.unwrap();

        let err = CollectionRepository::<TeamMember>::new(&store)
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupt { ref key, .. } if key == "teamMembers"));
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_not_lost() {
        let store = Store::memory();
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                CollectionRepository::<TeamMember>::new(&store)
                    .mutate(|team| {
                        team.insert(member(&format!("member {i}")));
                        Ok::<_, RepositoryError>(())
                    })
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let team = CollectionRepository::<TeamMember>::new(&store).load().await.unwrap();
        assert_eq!(team.len(), 16);
    }
}
