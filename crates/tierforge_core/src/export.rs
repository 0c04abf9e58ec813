//! Export document rendering.
//!
//! # Responsibility
//! - Render a registry/board/catalog snapshot into a flat styled document
//!   for an external rasterizer.
//! - Produce the download file name for the rasterized image.
//!
//! # Invariants
//! - Sections follow tier registry order; the unassigned bucket is never
//!   rendered.
//! - Tiers with no assigned items still render as empty sections.
//! - Identical inputs always render a structurally identical document.

use crate::board::assignment::AssignmentBoard;
use crate::catalog::ItemCatalog;
use crate::model::container::ContainerRef;
use crate::model::tier::Tier;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Document title used when the template carries no name.
pub const FALLBACK_TITLE: &str = "Tier List";

const FALLBACK_FILE_BASE: &str = "tierlist";

/// Errors surfaced around the export boundary.
///
/// The board and registry are never touched by a failed export; every
/// variant is safe to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Another export is still in flight against the same snapshot.
    ExportInProgress,
    /// External rasterization or download step failed.
    Rasterization(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExportInProgress => write!(f, "an export is already in progress"),
            Self::Rasterization(message) => write!(f, "export failed: {message}"),
        }
    }
}

impl Error for ExportError {}

/// One rendered tier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSection {
    /// Tier label at render time.
    pub label: String,
    /// Row display color as `#rrggbb`.
    pub color: String,
    /// Image references of assigned items, in assignment order. Broken
    /// references pass through untouched; validation is a rasterizer
    /// concern.
    pub items: Vec<String>,
}

/// Deterministic, renderer-produced structure for rasterization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Template name, or [`FALLBACK_TITLE`].
    pub title: String,
    /// Epoch milliseconds captured when the export began.
    pub generated_at_ms: i64,
    /// Tier rows in registry order.
    pub sections: Vec<TierSection>,
}

/// Renders one export document from a session snapshot. Pure transform:
/// nothing is mutated and nothing is fetched.
pub fn render(
    registry: &[Tier],
    board: &AssignmentBoard,
    catalog: &ItemCatalog,
    template_name: Option<&str>,
    generated_at_ms: i64,
) -> ExportDocument {
    let sections = registry
        .iter()
        .map(|tier| {
            let items = board
                .sequence(ContainerRef::Tier(tier.id))
                .map(|sequence| {
                    sequence
                        .iter()
                        .filter_map(|id| catalog.get(id))
                        .map(|item| item.image_url.clone())
                        .collect()
                })
                .unwrap_or_default();
            TierSection {
                label: tier.label.clone(),
                color: tier.color.as_str().to_string(),
                items,
            }
        })
        .collect();

    ExportDocument {
        title: effective_title(template_name),
        generated_at_ms,
        sections,
    }
}

/// Download name for the rasterized image:
/// `<template name or "tierlist">_<epoch millis>.png`.
pub fn export_file_name(template_name: Option<&str>, generated_at_ms: i64) -> String {
    let base = template_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_BASE);
    format!("{base}_{generated_at_ms}.png")
}

fn effective_title(template_name: Option<&str>) -> String {
    template_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}
