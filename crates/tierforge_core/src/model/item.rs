//! Classifiable item model.
//!
//! # Responsibility
//! - Define the immutable item record built at catalog load.
//! - Derive stable session item ids from template source ids.
//!
//! # Invariants
//! - `id` is unique and stable for one session.
//! - Items are never mutated after the catalog is built.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifier of the backing template-store record.
pub type SourceId = Uuid;

/// Stable per-session item identifier.
///
/// Synthesized deterministically from the source record id, so loading the
/// same template always yields the same ids. The `item-` prefix keeps the id
/// namespace disjoint from container identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Derives the session id for one source record.
    pub fn from_source(source_id: SourceId) -> Self {
        Self(format!("item-{source_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable classifiable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable session identifier.
    pub id: ItemId,
    /// Identifier back to the template-store record.
    pub source_id: SourceId,
    /// User-facing label, defaulted to the positional "Item N".
    pub display_name: String,
    /// Display image reference. Reachability is not validated here.
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::ItemId;
    use uuid::Uuid;

    #[test]
    fn item_id_is_deterministic_per_source() {
        let source_id = Uuid::new_v4();
        assert_eq!(ItemId::from_source(source_id), ItemId::from_source(source_id));
    }

    #[test]
    fn item_id_carries_item_prefix() {
        let id = ItemId::from_source(Uuid::new_v4());
        assert!(id.as_str().starts_with("item-"));
    }
}
