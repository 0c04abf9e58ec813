//! Container identity for item buckets.

use crate::model::tier::TierId;
use serde::{Deserialize, Serialize};

/// Identity of one ordered item bucket.
///
/// Exactly one container exists per registered tier, plus the reserved
/// bucket for not-yet-ranked items. Replaces the dynamic string keying of
/// container ids with a closed variant, so no code compares against a
/// reserved literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerRef {
    /// A registered tier's bucket.
    Tier(TierId),
    /// The reserved bucket holding items not assigned to any tier.
    Unassigned,
}
