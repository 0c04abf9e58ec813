//! Item catalog built once per editing session.
//!
//! # Responsibility
//! - Build immutable items from template-store records.
//! - Reject empty or malformed template input up front.
//!
//! # Invariants
//! - Item ids are unique within one catalog.
//! - Catalog order matches template item order.
//! - The catalog never changes after a successful load.

use crate::model::item::{Item, ItemId, SourceId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One template-store record, in template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Stable identifier within one template.
    pub source_id: SourceId,
    /// Display image reference.
    pub image_url: String,
    /// Optional upstream display name; the positional default applies
    /// when absent or blank.
    pub display_name: Option<String>,
}

/// Errors from catalog construction.
///
/// An empty or malformed catalog is a reported error, not a silently empty
/// tier list; editing stays unavailable until the load is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Template has no items.
    EmptyTemplate,
    /// Record at `index` carries a blank image reference.
    MissingImageUrl { index: usize },
    /// The same source id appears more than once in one template.
    DuplicateSourceId(SourceId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTemplate => write!(f, "template has no items"),
            Self::MissingImageUrl { index } => {
                write!(f, "template item {index} is missing an image url")
            }
            Self::DuplicateSourceId(source_id) => {
                write!(f, "duplicate template item id: {source_id}")
            }
        }
    }
}

impl Error for CatalogError {}

/// Immutable-after-load set of classifiable items for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Builds the catalog from ordered template records.
    ///
    /// Display names default to `"Item N"` with a 1-based position when the
    /// upstream record supplies none.
    pub fn load(records: Vec<SourceRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::EmptyTemplate);
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if record.image_url.trim().is_empty() {
                return Err(CatalogError::MissingImageUrl { index });
            }
            if !seen.insert(record.source_id) {
                return Err(CatalogError::DuplicateSourceId(record.source_id));
            }

            let display_name = match record.display_name {
                Some(name) if !name.trim().is_empty() => name,
                _ => format!("Item {}", index + 1),
            };
            items.push(Item {
                id: ItemId::from_source(record.source_id),
                source_id: record.source_id,
                display_name,
                image_url: record.image_url,
            });
        }

        Ok(Self { items })
    }

    /// Looks up one item by session id.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Item ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
