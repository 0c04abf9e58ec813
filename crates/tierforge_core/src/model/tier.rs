//! Tier descriptor model.
//!
//! # Responsibility
//! - Define the labeled, colored classification rows.
//! - Validate display colors before they enter the registry.
//!
//! # Invariants
//! - `id` is stable and never reused for another tier.
//! - `color` always holds a normalized `#rrggbb` value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex"));

/// Stable tier identifier.
pub type TierId = Uuid;

/// Validated `#rrggbb` display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierColor(String);

impl TierColor {
    /// Parses a `#rrggbb` value; returns `None` for anything else.
    ///
    /// Accepted values are normalized to lowercase.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if HEX_COLOR_RE.is_match(trimmed) {
            Some(Self(trimmed.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Labeled, colored, ordered classification bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Stable tier identifier.
    pub id: TierId,
    /// User-editable label. May be empty only transiently while renaming.
    pub label: String,
    /// Row display color.
    pub color: TierColor,
}

impl Tier {
    /// Creates a tier with a freshly generated unique id.
    pub fn new(label: impl Into<String>, color: TierColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            color,
        }
    }
}

/// Default tier rows seeded into a fresh session.
pub fn default_tiers() -> Vec<Tier> {
    [
        ("S", "#ff6c03"),
        ("A", "#ffa449"),
        ("B", "#ffd34d"),
        ("C", "#ffff7f"),
        ("D", "#bfff7f"),
        ("F", "#7fff7f"),
    ]
    .into_iter()
    .map(|(label, color)| Tier::new(label, TierColor(color.to_string())))
    .collect()
}
