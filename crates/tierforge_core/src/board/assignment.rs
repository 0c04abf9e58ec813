//! Container-to-sequence assignment store.
//!
//! # Responsibility
//! - Own the authoritative container → ordered item mapping.
//! - Keep the completeness invariant across tier container add/remove.
//!
//! # Invariants
//! - Every item id appearing in a sequence refers to a catalog entry.
//! - Dropping a tier container relocates its items to the end of the
//!   unassigned bucket before the container key disappears.

use super::sequence::ItemSequence;
use crate::catalog::ItemCatalog;
use crate::model::container::ContainerRef;
use crate::model::item::ItemId;
use crate::model::tier::TierId;
use std::collections::HashMap;

/// Authoritative mapping from container to ordered item sequence.
///
/// The board has no persistence of its own; it lives for the duration of
/// one editing session and is mutated only through the drag engine and the
/// session's tier operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentBoard {
    unassigned: ItemSequence,
    tiers: HashMap<TierId, ItemSequence>,
}

impl AssignmentBoard {
    /// Builds a board with every catalog item unassigned, in catalog order.
    pub fn from_catalog(catalog: &ItemCatalog) -> Self {
        Self {
            unassigned: ItemSequence::from_ids(catalog.ids().cloned().collect()),
            tiers: HashMap::new(),
        }
    }

    /// Registers an empty container for a new tier.
    ///
    /// A container already present for `tier_id` is left untouched.
    pub fn add_container(&mut self, tier_id: TierId) {
        self.tiers.entry(tier_id).or_default();
    }

    /// Drops a tier container, relocating its items to the end of the
    /// unassigned bucket in their existing relative order.
    ///
    /// Returns `false` when the container is unknown.
    pub fn remove_container(&mut self, tier_id: TierId) -> bool {
        match self.tiers.remove(&tier_id) {
            Some(sequence) => {
                self.unassigned.append(sequence);
                true
            }
            None => false,
        }
    }

    /// Container currently holding `item`, when the item is on the board.
    pub fn container_of(&self, item: &ItemId) -> Option<ContainerRef> {
        if self.unassigned.contains(item) {
            return Some(ContainerRef::Unassigned);
        }
        self.tiers.iter().find_map(|(tier_id, sequence)| {
            sequence.contains(item).then_some(ContainerRef::Tier(*tier_id))
        })
    }

    pub fn has_container(&self, container: ContainerRef) -> bool {
        match container {
            ContainerRef::Unassigned => true,
            ContainerRef::Tier(tier_id) => self.tiers.contains_key(&tier_id),
        }
    }

    /// Ordered sequence of `container`, when registered.
    pub fn sequence(&self, container: ContainerRef) -> Option<&ItemSequence> {
        match container {
            ContainerRef::Unassigned => Some(&self.unassigned),
            ContainerRef::Tier(tier_id) => self.tiers.get(&tier_id),
        }
    }

    pub(crate) fn sequence_mut(&mut self, container: ContainerRef) -> Option<&mut ItemSequence> {
        match container {
            ContainerRef::Unassigned => Some(&mut self.unassigned),
            ContainerRef::Tier(tier_id) => self.tiers.get_mut(&tier_id),
        }
    }

    /// Inserts `item` into `container` at `index`, handing the item back
    /// when the container is unknown.
    pub(crate) fn insert_into(
        &mut self,
        container: ContainerRef,
        index: usize,
        item: ItemId,
    ) -> Result<(), ItemId> {
        match self.sequence_mut(container) {
            Some(sequence) => {
                sequence.insert_at(index, item);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Number of registered tier containers.
    pub fn tier_container_count(&self) -> usize {
        self.tiers.len()
    }

    /// Total number of item ids across all containers.
    pub fn item_count(&self) -> usize {
        self.unassigned.len() + self.tiers.values().map(ItemSequence::len).sum::<usize>()
    }
}
