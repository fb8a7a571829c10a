//! Persisted collections.
//!
//! A collection is the complete, ordered list of one record type. It is
//! stored as a single JSON array under a fixed key, and the array order is
//! the order the dashboard shows.

use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::reorder::{self, ReorderError};
use crate::validate::Validate;

/// An entity kept in a persisted collection.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Display + Serialize + DeserializeOwned + Send + Sync + From<String>;
    /// Form payload used to create or replace the record.
    type Draft: Validate + DeserializeOwned + Send + 'static;

    /// Storage key holding the whole collection.
    const COLLECTION_KEY: &'static str;
    /// Singular name used in messages and logs.
    const LABEL: &'static str;

    /// Fresh random id for a record about to be created.
    #[must_use]
    fn new_id() -> Self::Id {
        Self::Id::from(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Build a new record from a validated draft.
    fn from_draft(id: Self::Id, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Replace the editable fields with those of `draft`.
    ///
    /// Identity and creation time are preserved.
    fn apply(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    fn id(&self) -> &Self::Id;

    /// Text fields searched by [`Collection::filter`].
    fn search_text(&self) -> Vec<&str>;

    /// Case-insensitive substring match over [`Record::search_text`].
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.search_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    }
}

/// The in-memory form of a persisted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a record.
    pub fn insert(&mut self, record: T) {
        self.items.push(record);
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutate the record matching `id` in place.
    ///
    /// Returns `None` if no record has that id.
    pub fn replace<R>(&mut self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.items.iter_mut().find(|item| item.id() == id).map(f)
    }

    /// Remove the record matching `id`.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Records whose searchable text contains `query`, ignoring case.
    ///
    /// A blank query matches everything, in stored order.
    #[must_use]
    pub fn filter(&self, query: Option<&str>) -> Vec<&T> {
        let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .collect()
    }

    /// Ids in stored order.
    #[must_use]
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    /// Move the record at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::OutOfBounds`] for invalid indices.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        reorder::move_within(&mut self.items, from, to)
    }

    /// Rearrange records to follow `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Mismatch`] unless `ids` is a permutation of
    /// the current ids.
    pub fn reorder_by_ids(&mut self, ids: &[T::Id]) -> Result<(), ReorderError> {
        reorder::apply_order(&mut self.items, ids, T::id)
    }
}
