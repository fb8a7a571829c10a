//! JSON API route handlers for admin.
//!
//! Every collection gets the same list/create/read/replace/delete routes
//! from [`resource::router`]; the modules below add the operations that
//! only make sense for one kind of record.

pub mod editor;
pub mod media;
pub mod preferences;
pub mod products;
pub mod resource;
pub mod sales;
pub mod sections;
pub mod widgets;

use std::hash::Hash;

use axum::Router;
use serde::Deserialize;
use sitedeck_core::models::{
    BlogPost, Page, Product, Profile, Sale, TeamMember, Testimonial, User,
};
use sitedeck_core::{Collection, Record, ReorderError, reorder};

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(resource::router::<BlogPost>("/api/posts"))
        .merge(resource::router::<Product>("/api/products"))
        .merge(resource::router::<Sale>("/api/sales"))
        .merge(resource::router::<Testimonial>("/api/testimonials"))
        .merge(resource::router::<TeamMember>("/api/team"))
        .merge(resource::router::<Profile>("/api/profiles"))
        .merge(resource::router::<User>("/api/users"))
        .merge(resource::router::<Page>("/api/pages"))
        .merge(products::router())
        .merge(sales::router())
        .merge(sections::router())
        .merge(widgets::router())
        .merge(preferences::router())
        .merge(media::router())
        .merge(editor::router())
}

/// Body of a reorder request: either the complete new id order, or a
/// single drag from one index to another.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReorderRequest {
    Ids { ids: Vec<String> },
    Move { from: usize, to: usize },
}

impl ReorderRequest {
    /// Apply the request to a plain list keyed by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError`] if the ids or indices do not fit the list.
    pub fn apply_to<T, K, F>(self, list: &mut Vec<T>, key: F) -> Result<(), ReorderError>
    where
        K: Eq + Hash + std::fmt::Display + From<String>,
        F: Fn(&T) -> &K,
    {
        match self {
            Self::Ids { ids } => {
                let ids: Vec<K> = ids.into_iter().map(K::from).collect();
                reorder::apply_order(list, &ids, key)
            }
            Self::Move { from, to } => reorder::move_within(list, from, to),
        }
    }

    /// Apply the request to a stored collection.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError`] if the ids or indices do not fit the collection.
    pub fn apply<T: Record>(self, collection: &mut Collection<T>) -> Result<(), ReorderError> {
        match self {
            Self::Ids { ids } => {
                let ids: Vec<T::Id> = ids.into_iter().map(T::Id::from).collect();
                collection.reorder_by_ids(&ids)
            }
            Self::Move { from, to } => collection.move_item(from, to),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_request_shapes() {
        let ids: ReorderRequest = serde_json::from_str(r#"{"ids":["b","a"]}"#).unwrap();
        assert!(matches!(ids, ReorderRequest::Ids { ref ids } if ids == &["b", "a"]));

        let drag: ReorderRequest = serde_json::from_str(r#"{"from":2,"to":0}"#).unwrap();
        assert!(matches!(drag, ReorderRequest::Move { from: 2, to: 0 }));

        assert!(serde_json::from_str::<ReorderRequest>(r#"{"from":-1}"#).is_err());
    }

    #[test]
    fn test_apply_to_plain_list() {
        let mut list = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        ReorderRequest::Move { from: 0, to: 2 }
            .apply_to(&mut list, |s| s)
            .unwrap();
        assert_eq!(list, ["b", "c", "a"]);

        ReorderRequest::Ids {
            ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }
        .apply_to(&mut list, |s| s)
        .unwrap();
        assert_eq!(list, ["a", "b", "c"]);

        let err = ReorderRequest::Ids { ids: vec![] }
            .apply_to(&mut list, |s| s)
            .unwrap_err();
        assert!(matches!(err, ReorderError::Mismatch(_)));
    }
}
