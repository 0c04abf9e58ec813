//! Drag gesture resolution engine.
//!
//! # Responsibility
//! - Turn one completed drag gesture into an assignment board transition.
//!
//! # Invariants
//! - Resolution is total: malformed gestures degrade to no-ops, never
//!   errors, so an ambiguous gesture can never corrupt or lose an item.
//! - Dropping on a container's empty area appends to that container;
//!   dropping on an item inserts immediately before it. There is no
//!   insert-after semantics.
//! - Same-container target indexes are located after the active item has
//!   been removed from the sequence.

use super::assignment::AssignmentBoard;
use crate::model::container::ContainerRef;
use crate::model::item::ItemId;

/// What the pointer was over when the gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Released over a container's own area, not over an item.
    Container(ContainerRef),
    /// Released over another item.
    Item(ItemId),
}

/// One completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Item captured at drag start.
    pub active_item: ItemId,
    /// Drop target; `None` when released outside every droppable region.
    pub target: Option<DropTarget>,
}

/// Applies one gesture to the board. Returns whether the board changed.
///
/// Source and destination are updated as one transition: no caller ever
/// observes the active item in neither or both containers.
pub fn resolve_drag(board: &mut AssignmentBoard, gesture: &DragGesture) -> bool {
    let Some(target) = gesture.target.as_ref() else {
        // Released outside all droppable regions.
        return false;
    };
    if matches!(target, DropTarget::Item(over) if over == &gesture.active_item) {
        // Dropping an item back onto itself is a stay-put gesture.
        return false;
    }
    let Some(source) = board.container_of(&gesture.active_item) else {
        // Unreachable while the completeness invariant holds.
        return false;
    };

    let destination = match target {
        DropTarget::Container(container) => {
            if !board.has_container(*container) {
                // Stale container id; gesture treated as cancelled.
                return false;
            }
            *container
        }
        DropTarget::Item(over) => match board.container_of(over) {
            Some(container) => container,
            // Target item vanished; gesture treated as cancelled.
            None => return false,
        },
    };

    if destination == source {
        reorder_within(board, source, &gesture.active_item, target)
    } else {
        move_between(board, source, destination, &gesture.active_item, target)
    }
}

fn reorder_within(
    board: &mut AssignmentBoard,
    container: ContainerRef,
    active: &ItemId,
    target: &DropTarget,
) -> bool {
    let Some(sequence) = board.sequence_mut(container) else {
        return false;
    };
    let Some(old_index) = sequence.position(active) else {
        return false;
    };
    let Some(moved) = sequence.remove_at(old_index) else {
        return false;
    };

    let new_index = match target {
        DropTarget::Container(_) => sequence.len(),
        DropTarget::Item(over) => sequence.position(over).unwrap_or(sequence.len()),
    };
    sequence.insert_at(new_index, moved);
    new_index != old_index
}

fn move_between(
    board: &mut AssignmentBoard,
    source: ContainerRef,
    destination: ContainerRef,
    active: &ItemId,
    target: &DropTarget,
) -> bool {
    // The destination index is resolved before the source is touched, so a
    // stale destination can never strand the item. Removing from the source
    // does not shift destination indexes; the containers are distinct.
    let new_index = match board.sequence(destination) {
        Some(sequence) => match target {
            DropTarget::Container(_) => sequence.len(),
            DropTarget::Item(over) => sequence.position(over).unwrap_or(sequence.len()),
        },
        None => return false,
    };
    let Some(old_index) = board
        .sequence(source)
        .and_then(|sequence| sequence.position(active))
    else {
        return false;
    };
    let Some(moved) = board
        .sequence_mut(source)
        .and_then(|sequence| sequence.remove_at(old_index))
    else {
        return false;
    };

    match board.insert_into(destination, new_index, moved) {
        Ok(()) => true,
        Err(item) => {
            // Unreachable after destination resolution; restore the item
            // rather than lose it.
            let _ = board.insert_into(source, old_index, item);
            false
        }
    }
}
