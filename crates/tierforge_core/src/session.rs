//! Editing session controller.
//!
//! # Responsibility
//! - Own the catalog, tier registry, assignment board, and transient drag
//!   state for one editing session.
//! - Expose every mutation of the classification as an explicit operation.
//!
//! # Invariants
//! - Registry and board always agree on the set of tier containers.
//! - Registry order is append-only; tiers are never reordered relative to
//!   each other.
//! - At most one export may be in flight at a time.

use crate::board::assignment::AssignmentBoard;
use crate::board::drag::{resolve_drag, DragGesture, DropTarget};
use crate::catalog::{CatalogError, ItemCatalog, SourceRecord};
use crate::export::{render, ExportDocument, ExportError};
use crate::model::item::ItemId;
use crate::model::tier::{default_tiers, Tier, TierColor, TierId};
use crate::repo::template_repo::{TemplateId, TemplateRepoError, TemplateRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected tier mutation. The session state is unchanged; the caller is
/// expected to re-prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tier label is empty after trimming.
    BlankLabel,
    /// Color value is not a `#rrggbb` string.
    InvalidColor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "tier label must not be blank"),
            Self::InvalidColor(value) => write!(f, "invalid tier color: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Errors from starting a session off the template store.
#[derive(Debug)]
pub enum SessionLoadError {
    /// Template store failure.
    Store(TemplateRepoError),
    /// Requested template does not exist.
    UnknownTemplate(TemplateId),
    /// Template loaded but its items cannot form a catalog.
    Catalog(CatalogError),
}

impl Display for SessionLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::UnknownTemplate(template_uuid) => {
                write!(f, "template not found: {template_uuid}")
            }
            Self::Catalog(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::UnknownTemplate(_) => None,
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<TemplateRepoError> for SessionLoadError {
    fn from(value: TemplateRepoError) -> Self {
        Self::Store(value)
    }
}

/// One editing session over a loaded template.
///
/// The session object is the only mutation entry point for registry and
/// board; no field is reachable for mutation outside its operations.
#[derive(Debug, Clone)]
pub struct TierlistSession {
    template_name: Option<String>,
    catalog: ItemCatalog,
    registry: Vec<Tier>,
    board: AssignmentBoard,
    active_item: Option<ItemId>,
    export_in_flight: bool,
}

impl TierlistSession {
    /// Starts a session with the default tier rows.
    pub fn load(
        template_name: Option<String>,
        records: Vec<SourceRecord>,
    ) -> Result<Self, CatalogError> {
        Self::load_with_tiers(template_name, records, default_tiers())
    }

    /// Starts a session with a caller-provided tier set.
    pub fn load_with_tiers(
        template_name: Option<String>,
        records: Vec<SourceRecord>,
        tiers: Vec<Tier>,
    ) -> Result<Self, CatalogError> {
        let catalog = ItemCatalog::load(records)?;
        let mut board = AssignmentBoard::from_catalog(&catalog);
        for tier in &tiers {
            board.add_container(tier.id);
        }
        info!(
            "event=session_load module=session status=ok items={} tiers={}",
            catalog.len(),
            tiers.len()
        );
        Ok(Self {
            template_name,
            catalog,
            registry: tiers,
            board,
            active_item: None,
            export_in_flight: false,
        })
    }

    /// Loads template metadata and items from the store, then starts a
    /// session with the default tier rows.
    pub fn load_from_store<R: TemplateRepository>(
        repo: &R,
        template_uuid: TemplateId,
    ) -> Result<Self, SessionLoadError> {
        let template = repo
            .get_template(template_uuid)?
            .ok_or(SessionLoadError::UnknownTemplate(template_uuid))?;
        let records = repo
            .list_template_items(template_uuid)?
            .into_iter()
            .map(|item| SourceRecord {
                source_id: item.item_uuid,
                image_url: item.image_url,
                display_name: None,
            })
            .collect();
        Self::load(Some(template.name), records).map_err(SessionLoadError::Catalog)
    }

    /// Appends a new tier with a freshly generated id.
    ///
    /// The board gains an empty container keyed by the new tier id.
    pub fn add_tier(&mut self, label: &str, color: &str) -> Result<TierId, ValidationError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::BlankLabel);
        }
        let color =
            TierColor::parse(color).ok_or_else(|| ValidationError::InvalidColor(color.to_string()))?;

        let tier = Tier::new(label, color);
        let tier_id = tier.id;
        self.board.add_container(tier_id);
        self.registry.push(tier);
        debug!("event=tier_add module=session status=ok tier={tier_id}");
        Ok(tier_id)
    }

    /// Updates a tier label in place, verbatim.
    ///
    /// Unknown ids are tolerated silently to absorb races with concurrent
    /// deletion. Transient empty labels are allowed here; blank labels are
    /// rejected only at [`Self::add_tier`].
    pub fn rename_tier(&mut self, tier_id: TierId, label: &str) {
        if let Some(tier) = self.registry.iter_mut().find(|tier| tier.id == tier_id) {
            tier.label = label.to_string();
        }
    }

    /// Removes a tier, relocating its items to the end of the unassigned
    /// bucket in their existing relative order.
    ///
    /// Registry entry and board container go in one step; unknown ids are a
    /// silent no-op.
    pub fn remove_tier(&mut self, tier_id: TierId) {
        let Some(index) = self.registry.iter().position(|tier| tier.id == tier_id) else {
            return;
        };
        self.registry.remove(index);
        self.board.remove_container(tier_id);
        debug!("event=tier_remove module=session status=ok tier={tier_id}");
    }

    /// Enters the dragging state for one catalog item.
    ///
    /// Unknown item ids leave the session outside the dragging state, so the
    /// following drag-end resolves to a no-op.
    pub fn drag_start(&mut self, item_id: ItemId) {
        self.active_item = self.catalog.contains(&item_id).then_some(item_id);
    }

    /// Exits the dragging state and resolves the gesture against the board.
    ///
    /// Returns whether the board changed. Never fails: unresolvable gestures
    /// leave the classification untouched.
    pub fn drag_end(&mut self, target: Option<DropTarget>) -> bool {
        let Some(active_item) = self.active_item.take() else {
            return false;
        };
        let gesture = DragGesture {
            active_item,
            target,
        };
        let changed = resolve_drag(&mut self.board, &gesture);
        if changed {
            debug!(
                "event=drag_resolve module=session status=ok item={}",
                gesture.active_item
            );
        }
        changed
    }

    /// Renders the current snapshot for rasterization, entering the
    /// export-in-flight state.
    ///
    /// A second export against the same snapshot is rejected with
    /// [`ExportError::ExportInProgress`] until [`Self::finish_export`] is
    /// called.
    pub fn begin_export(&mut self, generated_at_ms: i64) -> Result<ExportDocument, ExportError> {
        if self.export_in_flight {
            return Err(ExportError::ExportInProgress);
        }
        self.export_in_flight = true;
        info!("event=export_begin module=session status=ok at_ms={generated_at_ms}");
        Ok(render(
            &self.registry,
            &self.board,
            &self.catalog,
            self.template_name.as_deref(),
            generated_at_ms,
        ))
    }

    /// Marks the in-flight export settled, successfully or not.
    pub fn finish_export(&mut self) {
        self.export_in_flight = false;
    }

    pub fn export_in_flight(&self) -> bool {
        self.export_in_flight
    }

    /// Tiers in registry order.
    pub fn tiers(&self) -> &[Tier] {
        &self.registry
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &AssignmentBoard {
        &self.board
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    /// Item currently being dragged, if any.
    pub fn dragging(&self) -> Option<&ItemId> {
        self.active_item.as_ref()
    }
}
