//! Ordered item sequence primitive.

use crate::model::item::ItemId;
use serde::{Deserialize, Serialize};

/// Ordered sequence of item ids with explicit index primitives.
///
/// The drag engine's contract is expressed purely in terms of `position`,
/// `remove_at`, and `insert_at`, independent of the backing representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSequence(Vec<ItemId>);

impl ItemSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_ids(ids: Vec<ItemId>) -> Self {
        Self(ids)
    }

    /// Index of `id`, if present.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.0.iter().position(|current| current == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts `id` at `index`, clamped to the current length.
    pub fn insert_at(&mut self, index: usize, id: ItemId) {
        let index = index.min(self.0.len());
        self.0.insert(index, id);
    }

    /// Removes and returns the id at `index`, when in bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<ItemId> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    /// Appends all ids of `other`, preserving their relative order.
    pub fn append(&mut self, other: ItemSequence) {
        self.0.extend(other.0);
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
