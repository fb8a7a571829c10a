//! Drag-to-reorder list utility.
//!
//! Mirrors the drag-start / drag-over / drag-end cycle of a sortable list:
//! the dragged element is spliced to each hovered position as the pointer
//! moves, so the list is always in its visible order, and the final order is
//! what gets persisted when the drag ends.

use std::collections::HashSet;
use std::hash::Hash;

/// Errors produced by reorder operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// An index does not address an element of the list.
    #[error("index {index} is out of bounds for a list of {len}")]
    OutOfBounds { index: usize, len: usize },
    /// `over` was called without a preceding `start`.
    #[error("no drag in progress")]
    NotDragging,
    /// A requested id order is not a permutation of the current ids.
    #[error("id order does not match the list: {0}")]
    Mismatch(String),
}

/// Move the element at `from` so it ends up at index `to`.
///
/// # Errors
///
/// Returns [`ReorderError::OutOfBounds`] if either index is past the end.
pub fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), ReorderError> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::OutOfBounds { index, len });
        }
    }
    if from != to {
        let item = list.remove(from);
        list.insert(to, item);
    }
    Ok(())
}

/// Rearrange `list` so that its keys appear in the order given by `ids`.
///
/// `ids` must name every element exactly once.
///
/// # Errors
///
/// Returns [`ReorderError::Mismatch`] if `ids` has duplicates, unknown ids,
/// or misses an element.
pub fn apply_order<T, K, F>(list: &mut Vec<T>, ids: &[K], key: F) -> Result<(), ReorderError>
where
    K: Eq + Hash + std::fmt::Display,
    F: Fn(&T) -> &K,
{
    if ids.len() != list.len() {
        return Err(ReorderError::Mismatch(format!(
            "expected {} ids, got {}",
            list.len(),
            ids.len()
        )));
    }

    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(ReorderError::Mismatch(format!("duplicate id {id}")));
        }
        if !list.iter().any(|item| key(item) == id) {
            return Err(ReorderError::Mismatch(format!("unknown id {id}")));
        }
    }

    // Same length, no duplicates, all known: `ids` is a permutation.
    let mut remaining: Vec<Option<T>> = list.drain(..).map(Some).collect();
    for id in ids {
        if let Some(item) = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|item| key(item) == id))
            .and_then(Option::take)
        {
            list.push(item);
        }
    }
    Ok(())
}

/// State of an in-progress drag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    dragging: Option<usize>,
}

impl DragSession {
    /// Begin dragging the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::OutOfBounds`] if `index` is past the end.
    pub fn start<T>(list: &[T], index: usize) -> Result<Self, ReorderError> {
        if index >= list.len() {
            return Err(ReorderError::OutOfBounds {
                index,
                len: list.len(),
            });
        }
        Ok(Self {
            dragging: Some(index),
        })
    }

    /// Index the dragged element currently occupies.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        self.dragging
    }

    /// The pointer moved over `target`: splice the dragged element there.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::NotDragging`] after `end`, or
    /// [`ReorderError::OutOfBounds`] for an invalid target.
    pub fn over<T>(&mut self, list: &mut Vec<T>, target: usize) -> Result<(), ReorderError> {
        let from = self.dragging.ok_or(ReorderError::NotDragging)?;
        move_within(list, from, target)?;
        self.dragging = Some(target);
        Ok(())
    }

    /// Finish the drag, returning the element's final index.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::NotDragging`] if no drag is in progress.
    pub fn end(&mut self) -> Result<usize, ReorderError> {
        self.dragging.take().ok_or(ReorderError::NotDragging)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_move_within_forward_and_back() {
        let mut list = vec!['a', 'b', 'c', 'd'];
        move_within(&mut list, 0, 2).unwrap();
        assert_eq!(list, ['b', 'c', 'a', 'd']);
        move_within(&mut list, 3, 0).unwrap();
        assert_eq!(list, ['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_move_within_out_of_bounds_leaves_list() {
        let mut list = vec![1, 2];
        assert_eq!(
            move_within(&mut list, 0, 2),
            Err(ReorderError::OutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn test_drag_session_follows_pointer() {
        let mut list = vec!["traffic", "orders", "sales", "posts"];
        let mut drag = DragSession::start(&list, 0).unwrap();

        drag.over(&mut list, 1).unwrap();
        drag.over(&mut list, 2).unwrap();
        assert_eq!(list, ["orders", "sales", "traffic", "posts"]);

        drag.over(&mut list, 1).unwrap();
        assert_eq!(list, ["orders", "traffic", "sales", "posts"]);
        assert_eq!(drag.end().unwrap(), 1);

        assert_eq!(drag.over(&mut list, 0), Err(ReorderError::NotDragging));
    }

    #[test]
    fn test_apply_order() {
        let mut list = vec![("a", 1), ("b", 2), ("c", 3)];
        apply_order(&mut list, &["c", "a", "b"], |item| &item.0).unwrap();
        assert_eq!(list, [("c", 3), ("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_apply_order_rejects_bad_ids_without_touching_list() {
        let mut list = vec![("b", 2), ("a", 1)];

        assert!(apply_order(&mut list, &["a"], |item| &item.0).is_err());
        assert!(apply_order(&mut list, &["a", "a"], |item| &item.0).is_err());
        assert!(apply_order(&mut list, &["a", "z"], |item| &item.0).is_err());

        assert_eq!(list, [("b", 2), ("a", 1)]);
    }
}
