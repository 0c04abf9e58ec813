use tierforge_core::{
    ContainerRef, DropTarget, ItemId, SourceRecord, TierlistSession, ValidationError,
};
use uuid::Uuid;

fn records(count: usize) -> Vec<SourceRecord> {
    (0..count)
        .map(|index| SourceRecord {
            source_id: Uuid::new_v4(),
            image_url: format!("https://example.com/{index}.png"),
            display_name: None,
        })
        .collect()
}

fn session(item_count: usize) -> TierlistSession {
    TierlistSession::load(Some("Snacks".to_string()), records(item_count)).unwrap()
}

#[test]
fn fresh_session_seeds_default_tier_rows() {
    let session = session(1);

    let labels: Vec<_> = session.tiers().iter().map(|tier| tier.label.clone()).collect();
    assert_eq!(labels, ["S", "A", "B", "C", "D", "F"]);
    assert_eq!(session.tiers()[0].color.as_str(), "#ff6c03");

    for tier in session.tiers() {
        let sequence = session.board().sequence(ContainerRef::Tier(tier.id)).unwrap();
        assert!(sequence.is_empty());
    }
    assert_eq!(
        session.board().sequence(ContainerRef::Unassigned).unwrap().len(),
        1
    );
}

#[test]
fn add_tier_appends_and_registers_empty_container() {
    let mut session = session(1);

    let tier_id = session.add_tier("G", "#cccccc").unwrap();

    let last = session.tiers().last().unwrap();
    assert_eq!(last.id, tier_id);
    assert_eq!(last.label, "G");
    assert_eq!(last.color.as_str(), "#cccccc");
    assert!(session
        .board()
        .sequence(ContainerRef::Tier(tier_id))
        .unwrap()
        .is_empty());
    assert_eq!(session.board().tier_container_count(), session.tiers().len());
}

#[test]
fn add_tier_trims_label() {
    let mut session = session(1);
    let tier_id = session.add_tier("  G  ", "#cccccc").unwrap();
    let tier = session.tiers().iter().find(|tier| tier.id == tier_id).unwrap();
    assert_eq!(tier.label, "G");
}

#[test]
fn add_tier_rejects_blank_label() {
    let mut session = session(1);
    let before = session.tiers().len();

    let err = session.add_tier("   ", "#cccccc").unwrap_err();
    assert_eq!(err, ValidationError::BlankLabel);
    assert_eq!(session.tiers().len(), before);
}

#[test]
fn add_tier_rejects_invalid_color() {
    let mut session = session(1);
    let before = session.tiers().len();

    let err = session.add_tier("G", "cccccc").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidColor(value) if value == "cccccc"));
    assert_eq!(session.tiers().len(), before);
}

#[test]
fn rename_tier_updates_label_in_place() {
    let mut session = session(1);
    let target = session.tiers()[2].id;
    let order_before: Vec<_> = session.tiers().iter().map(|tier| tier.id).collect();

    session.rename_tier(target, "Mid");

    let order_after: Vec<_> = session.tiers().iter().map(|tier| tier.id).collect();
    assert_eq!(order_after, order_before);
    assert_eq!(session.tiers()[2].label, "Mid");
}

#[test]
fn rename_tier_allows_transient_empty_label() {
    let mut session = session(1);
    let target = session.tiers()[0].id;

    session.rename_tier(target, "");
    assert_eq!(session.tiers()[0].label, "");
}

#[test]
fn rename_unknown_tier_is_noop() {
    let mut session = session(1);
    let before: Vec<_> = session.tiers().to_vec();

    session.rename_tier(Uuid::new_v4(), "Ghost");
    assert_eq!(session.tiers(), before.as_slice());
}

#[test]
fn remove_tier_relocates_items_after_existing_unassigned() {
    let mut session = session(5);
    let ids: Vec<ItemId> = session.catalog().ids().cloned().collect();
    let tier = session.tiers()[0].id;

    // Tier holds [a, b, c]; unassigned keeps [x, y].
    for item in &ids[..3] {
        session.drag_start(item.clone());
        session.drag_end(Some(DropTarget::Container(ContainerRef::Tier(tier))));
    }
    assert_eq!(
        session.board().sequence(ContainerRef::Tier(tier)).unwrap().ids(),
        &ids[..3]
    );

    session.remove_tier(tier);

    assert!(session.tiers().iter().all(|t| t.id != tier));
    assert!(session.board().sequence(ContainerRef::Tier(tier)).is_none());
    assert_eq!(session.board().tier_container_count(), session.tiers().len());
    let unassigned = session.board().sequence(ContainerRef::Unassigned).unwrap();
    let expected: Vec<ItemId> = ids[3..].iter().chain(&ids[..3]).cloned().collect();
    assert_eq!(unassigned.ids(), expected.as_slice());
}

#[test]
fn remove_unknown_tier_is_noop() {
    let mut session = session(2);
    let tiers_before = session.tiers().to_vec();
    let board_before = session.board().clone();

    session.remove_tier(Uuid::new_v4());

    assert_eq!(session.tiers(), tiers_before.as_slice());
    assert_eq!(session.board(), &board_before);
}

#[test]
fn registry_order_is_append_only() {
    let mut session = session(1);
    let first_added = session.add_tier("G", "#cccccc").unwrap();
    let second_added = session.add_tier("H", "#dddddd").unwrap();

    let ids: Vec<_> = session.tiers().iter().map(|tier| tier.id).collect();
    assert_eq!(ids[ids.len() - 2], first_added);
    assert_eq!(ids[ids.len() - 1], second_added);
}
