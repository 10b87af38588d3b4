//! Integration tests for PlannerHarness.
//!
//! Scripts the same pointer flows the panels produce, against the headless
//! harness, and checks the interaction contract both surfaces share.

use std::sync::Arc;

use roomplan_gui_lib::fixtures;
use roomplan_gui_lib::harness::PlannerHarness;
use roomplan_gui_lib::plan::PlanPos;
use shared::{Category, RoomSpec};

#[test]
fn test_harness_place_and_totals() {
    let mut h = PlannerHarness::new();
    h.add_item("sofa-fabric").unwrap();
    h.add_item("lamp-floor").unwrap();

    assert_eq!(h.placement_count(), 2);
    assert_eq!(h.total_price(), 449.0 + 59.0);
    assert!(h.interaction.is_idle());
}

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = PlannerHarness::new();
    h.add_item("armchair").unwrap();
    h.add_item("bookshelf").unwrap();
    assert_eq!(h.placement_count(), 2);

    assert!(h.undo());
    assert_eq!(h.placement_count(), 1);

    assert!(h.undo());
    assert_eq!(h.placement_count(), 0);

    assert!(!h.undo()); // nothing to undo
    assert_eq!(h.placement_count(), 0);

    assert!(h.redo());
    assert_eq!(h.placement_count(), 1);

    assert!(h.redo());
    assert_eq!(h.placement_count(), 2);

    assert!(!h.redo()); // nothing to redo
}

#[test]
fn test_plan_drag_clamps_to_band() {
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("table-dining", 50.0, 50.0).unwrap();

    let grabbed = h.pointer_down_plan(PlanPos::CENTER);
    assert_eq!(grabbed.as_ref(), Some(&id));
    assert_eq!(h.interaction.dragging(), Some(&id));

    h.drag_plan_to(PlanPos::new(200.0, 50.0));
    let pos = h.layout.get(&id).unwrap().pos;
    assert_eq!(pos.x, 95.0);
    assert_eq!(pos.y, 50.0);

    h.pointer_up();
    assert_eq!(h.interaction.selected(), Some(&id));
}

#[test]
fn test_plan_empty_click_deselects() {
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("table-coffee", 50.0, 50.0).unwrap();
    h.interaction.select(id.clone());

    // (10, 10) is well clear of a coffee table footprint at the center
    assert!(h.hit_test_plan(PlanPos::new(10.0, 10.0)).is_none());
    h.pointer_down_plan(PlanPos::new(10.0, 10.0));
    assert!(h.interaction.is_idle());
    assert!(h.interaction.selected().is_none());
}

#[test]
fn test_drag_is_a_single_undo_step() {
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("armchair", 50.0, 50.0).unwrap();

    h.pointer_down_plan(PlanPos::CENTER);
    h.drag_plan_to(PlanPos::new(60.0, 50.0));
    h.drag_plan_to(PlanPos::new(70.0, 55.0));
    h.drag_plan_to(PlanPos::new(80.0, 60.0));
    h.pointer_up();

    let moved = h.layout.get(&id).unwrap().pos;
    assert_eq!(moved, PlanPos::new(80.0, 60.0));

    // One undo rewinds the whole gesture, not one step per move event
    assert!(h.undo());
    assert_eq!(h.layout.get(&id).unwrap().pos, PlanPos::CENTER);

    // A second undo removes the placement itself
    assert!(h.undo());
    assert_eq!(h.placement_count(), 0);
}

#[test]
fn test_remove_selected_resets_to_idle() {
    let mut h = PlannerHarness::new();
    let id = h.add_item("bed-double").unwrap();
    h.interaction.select(id.clone());

    assert!(h.remove_selected());
    assert_eq!(h.placement_count(), 0);
    assert!(h.interaction.is_idle());
}

#[test]
fn test_rotation_wraps_and_scale_clamps() {
    let mut h = PlannerHarness::new();
    let id = h.add_item("table-dining").unwrap();
    h.interaction.select(id.clone());

    h.rotate_selected(375.0);
    assert_eq!(h.layout.get(&id).unwrap().rotation_deg, 15.0);

    h.rotate_selected(-30.0);
    assert_eq!(h.layout.get(&id).unwrap().rotation_deg, 345.0);

    h.rescale_selected(5.0);
    assert_eq!(h.layout.get(&id).unwrap().scale, 2.0);

    h.rescale_selected(-5.0);
    assert_eq!(h.layout.get(&id).unwrap().scale, 0.5);
}

#[test]
fn test_ray_pick_hits_and_misses() {
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("wardrobe", 30.0, 50.0).unwrap();
    h.build_blocking();

    let hit = h.pick_ray(&h.down_ray_at(PlanPos::new(30.0, 50.0)));
    assert_eq!(hit.as_ref(), Some(&id));

    assert!(h.pick_ray(&h.down_ray_at(PlanPos::new(80.0, 80.0))).is_none());
}

#[test]
fn test_ray_drag_follows_the_ground_plane() {
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("table-coffee", 40.0, 40.0).unwrap();
    h.build_blocking();

    let down = h.down_ray_at(PlanPos::new(40.0, 40.0));
    assert_eq!(h.pointer_down_ray(&down).as_ref(), Some(&id));
    assert_eq!(h.interaction.dragging(), Some(&id));

    h.drag_ray_to(&h.down_ray_at(PlanPos::new(70.0, 50.0)));
    let pos = h.layout.get(&id).unwrap().pos;
    assert!((pos.x - 70.0).abs() < 0.01, "x was {}", pos.x);
    assert!((pos.y - 50.0).abs() < 0.01, "y was {}", pos.y);

    h.pointer_up();
    assert_eq!(h.interaction.selected(), Some(&id));
}

#[test]
fn test_ray_drag_respects_the_walls() {
    // Default room is 6 × 5 m; a dining table is 1.6 m wide, so its center
    // can travel no further than 2.2 m from the middle on the x axis.
    let mut h = PlannerHarness::new();
    let id = h.drop_item_at("table-dining", 50.0, 50.0).unwrap();
    h.build_blocking();

    h.pointer_down_ray(&h.down_ray_at(PlanPos::CENTER));
    h.drag_ray_to(&h.down_ray_at(PlanPos::new(99.0, 50.0)));

    let pos = h.layout.get(&id).unwrap().pos;
    let expected_x = ((3.0 - 0.8) / 6.0 + 0.5) * 100.0;
    assert!((pos.x - expected_x).abs() < 0.05, "x was {}", pos.x);
}

#[test]
fn test_ray_pick_miss_is_a_noop_for_dragging() {
    let mut h = PlannerHarness::new();
    h.drop_item_at("plant-monstera", 50.0, 50.0).unwrap();
    h.build_blocking();

    assert!(h.pointer_down_ray(&h.down_ray_at(PlanPos::new(90.0, 90.0))).is_none());
    assert!(h.interaction.dragging().is_none());
}

#[test]
fn test_export_json_round_trips() {
    let mut h = PlannerHarness::new();
    h.drop_item_at("sofa-fabric", 25.0, 60.0).unwrap();
    h.add_item("rug-wool").unwrap();

    let json = h.export_json().unwrap();
    let summary: shared::LayoutSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(summary.room, h.room);
    assert_eq!(summary.placements.len(), 2);
    assert_eq!(summary.total_price, 449.0 + 79.0);
    assert_eq!(summary.placements[0].item_id, "sofa-fabric");
    assert_eq!(summary.placements[0].x_pct, 25.0);
    assert_eq!(summary.placements[0].y_pct, 60.0);
}

/// One whole session: place, drag past a wall, rotate past a full turn,
/// remove.
#[test]
fn test_full_session_walkthrough() {
    let mut h = PlannerHarness::with_room(RoomSpec::new(5.0, 4.0).unwrap());
    let sofa = Arc::new(fixtures::item(
        "sofa-a",
        "Sofa A",
        450.0,
        Category::Sofa,
        220.0,
        85.0,
        95.0,
    ));
    let id = h.layout.place(sofa, PlanPos::CENTER);
    assert_eq!(h.total_price(), 450.0);

    assert_eq!(h.pointer_down_plan(PlanPos::CENTER).as_ref(), Some(&id));
    h.drag_plan_to(PlanPos::new(200.0, 50.0));
    h.pointer_up();
    let pos = h.layout.get(&id).unwrap().pos;
    assert_eq!(pos.x, 95.0);
    assert_eq!(pos.y, 50.0);
    assert_eq!(h.interaction.selected(), Some(&id));

    h.rotate_selected(375.0);
    assert_eq!(h.layout.get(&id).unwrap().rotation_deg, 15.0);

    assert!(h.remove_selected());
    assert_eq!(h.placement_count(), 0);
    assert_eq!(h.total_price(), 0.0);
    assert!(h.interaction.is_idle());
}
