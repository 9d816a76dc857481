#![allow(clippy::float_cmp)]

use super::*;
use crate::object::{PathCommand, Shape};
use crate::zoom::ZoomBounds;

// =============================================================
// Helpers
// =============================================================

fn rect(id: &str) -> DrawableObject {
    DrawableObject::new(id, Shape::Rectangle).at(0.0, 0.0, 10.0, 10.0)
}

fn text(id: &str) -> DrawableObject {
    DrawableObject::new(id, Shape::Text { text: "label".into() }).at(0.0, 0.0, 40.0, 12.0)
}

fn id(s: &str) -> ObjectId {
    ObjectId::from(s)
}

fn move_to(left: f64) -> PartialObject {
    PartialObject { left: Some(left), ..Default::default() }
}

fn ids(store: &SceneStore) -> Vec<&str> {
    store.objects().iter().map(|obj| obj.id.as_str()).collect()
}

fn store_with(objects: &[&str]) -> SceneStore {
    let mut store = SceneStore::default();
    for name in objects {
        store.add_object(rect(name)).unwrap();
    }
    store
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = SceneStore::default();
    assert!(store.objects().is_empty());
    assert!(store.selected_object_id().is_none());
    assert_eq!(store.active_tool(), Tool::Select);
    assert_eq!(store.zoom(), 1.0);
    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert_eq!(store.revision(), 0);
}

#[test]
fn new_store_clamps_initial_zoom_into_bounds() {
    let config = SceneConfig { zoom: ZoomBounds::new(1.5, 3.0).unwrap(), ..SceneConfig::default() };
    let store = SceneStore::new(config);
    assert_eq!(store.zoom(), 1.5);
}

#[test]
fn with_objects_starts_without_history() {
    let store = SceneStore::with_objects(vec![rect("a"), rect("b")], SceneConfig::default()).unwrap();
    assert_eq!(ids(&store), vec!["a", "b"]);
    assert!(!store.can_undo());
}

#[test]
fn with_objects_rejects_duplicates() {
    let err = SceneStore::with_objects(vec![rect("a"), rect("a")], SceneConfig::default()).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref dup) if dup.as_str() == "a"));
}

// =============================================================
// View state is never tracked
// =============================================================

#[test]
fn set_active_tool_is_not_tracked() {
    let mut store = SceneStore::default();
    store.set_active_tool(Tool::Pen);
    assert_eq!(store.active_tool(), Tool::Pen);
    assert!(!store.can_undo());
}

#[test]
fn select_existing_object() {
    let mut store = store_with(&["a"]);
    let past = store.history().past_len();
    assert!(store.select_object(Some(&id("a"))));
    assert_eq!(store.selected_object_id(), Some(&id("a")));
    assert_eq!(store.selected_object().map(|o| o.id.as_str()), Some("a"));
    assert_eq!(store.history().past_len(), past);
}

#[test]
fn select_unknown_object_is_ignored() {
    let mut store = store_with(&["a"]);
    store.select_object(Some(&id("a")));
    assert!(!store.select_object(Some(&id("ghost"))));
    assert_eq!(store.selected_object_id(), Some(&id("a")));
}

#[test]
fn select_none_clears() {
    let mut store = store_with(&["a"]);
    store.select_object(Some(&id("a")));
    assert!(store.select_object(None));
    assert!(store.selected_object_id().is_none());
}

#[test]
fn set_zoom_clamps_to_bounds() {
    let mut store = SceneStore::default();
    assert_eq!(store.set_zoom(5.0), 2.0);
    assert_eq!(store.set_zoom(0.1), 0.5);
    assert_eq!(store.set_zoom(1.25), 1.25);
    assert!(!store.can_undo());
}

#[test]
fn set_zoom_ignores_nan() {
    let mut store = SceneStore::default();
    store.set_zoom(1.5);
    assert_eq!(store.set_zoom(f64::NAN), 1.5);
}

#[test]
fn set_zoom_clamps_out_of_range_factors() {
    let mut store = SceneStore::default();
    assert_eq!(store.set_zoom(0.0), 0.5);
    assert_eq!(store.set_zoom(f64::INFINITY), 2.0);
    assert_eq!(store.set_zoom(-1.0), 0.5);
    assert_eq!(store.set_zoom(f64::NEG_INFINITY), 0.5);
}

#[test]
fn zoom_in_and_out_step_and_clamp() {
    let mut store = SceneStore::default();
    let zoomed = store.zoom_in();
    assert!((zoomed - 1.1).abs() < 1e-9);
    for _ in 0..20 {
        store.zoom_in();
    }
    assert_eq!(store.zoom(), 2.0);
    for _ in 0..30 {
        store.zoom_out();
    }
    assert_eq!(store.zoom(), 0.5);
}

#[test]
fn zoom_respects_wide_configured_bounds() {
    let config = SceneConfig { zoom: ZoomBounds::new(0.01, 20.0).unwrap(), ..SceneConfig::default() };
    let mut store = SceneStore::new(config);
    assert_eq!(store.set_zoom(15.0), 15.0);
    assert_eq!(store.set_zoom(0.001), 0.01);
}

#[test]
fn zoom_out_below_zero_lands_on_lower_bound() {
    let config =
        SceneConfig { zoom: ZoomBounds::new(0.01, 20.0).unwrap(), zoom_step: 0.1, ..SceneConfig::default() };
    let mut store = SceneStore::new(config);
    store.set_zoom(0.05);
    assert_eq!(store.zoom_out(), 0.01);
    assert_eq!(store.set_zoom(0.05), 0.05);
    assert_eq!(store.set_zoom(0.0), 0.01);
}

// =============================================================
// add_object
// =============================================================

#[test]
fn add_appends_and_checkpoints_previous_list() {
    let mut store = SceneStore::default();
    store.add_object(rect("a")).unwrap();
    store.add_object(rect("b")).unwrap();
    assert_eq!(ids(&store), vec!["a", "b"]);

    let past: Vec<Vec<&str>> =
        store.history().past().map(|snap| snap.iter().map(|o| o.id.as_str()).collect()).collect();
    assert_eq!(past, vec![vec![], vec!["a"]]);
    assert_eq!(store.revision(), 2);
}

#[test]
fn add_duplicate_id_rejects_atomically() {
    let mut store = store_with(&["a"]);
    let before = store.objects().to_vec();
    let past = store.history().past_len();

    let err = store.add_object(text("a")).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(_)));
    assert_eq!(err.error_code(), "E_DUPLICATE_ID");
    assert_eq!(store.objects(), before.as_slice());
    assert_eq!(store.history().past_len(), past);
}

#[test]
fn add_invalid_object_rejects_atomically() {
    let mut store = SceneStore::default();
    let mut bad = rect("a");
    bad.opacity = 3.0;
    let err = store.add_object(bad).unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_OBJECT");
    assert!(store.objects().is_empty());
    assert!(!store.can_undo());
}

#[test]
fn add_clears_redo_chain() {
    let mut store = store_with(&["a", "b"]);
    store.undo();
    assert!(store.can_redo());
    store.add_object(rect("c")).unwrap();
    assert!(!store.can_redo());
    assert!(!store.redo());
    assert_eq!(ids(&store), vec!["a", "c"]);
}

// =============================================================
// update_object
// =============================================================

#[test]
fn update_merges_and_checkpoints() {
    let mut store = store_with(&["a"]);
    assert!(store.update_object(&id("a"), &move_to(5.0)).unwrap());
    let obj = store.object(&id("a")).unwrap();
    assert_eq!(obj.left, 5.0);
    assert_eq!(obj.width, 10.0);
    assert_eq!(store.history().past_len(), 2);
}

#[test]
fn update_missing_id_is_skipped_without_history() {
    let mut store = store_with(&["a"]);
    let revision = store.revision();
    assert!(!store.update_object(&id("ghost"), &move_to(5.0)).unwrap());
    assert_eq!(store.history().past_len(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn update_foreign_field_rejects_without_history() {
    let mut store = store_with(&["a"]);
    let changes = PartialObject { text: Some("x".into()), ..Default::default() };
    let err = store.update_object(&id("a"), &changes).unwrap_err();
    assert_eq!(err.error_code(), "E_FIELD_NOT_APPLICABLE");
    assert_eq!(store.history().past_len(), 1);
}

#[test]
fn consecutive_updates_are_separate_steps() {
    let mut store = store_with(&["a"]);
    store.update_object(&id("a"), &move_to(1.0)).unwrap();
    store.update_object(&id("a"), &move_to(2.0)).unwrap();
    store.undo();
    assert_eq!(store.object(&id("a")).unwrap().left, 1.0);
}

#[test]
fn update_preserves_paint_order() {
    let mut store = store_with(&["a", "b", "c"]);
    store.update_object(&id("a"), &move_to(3.0)).unwrap();
    assert_eq!(ids(&store), vec!["a", "b", "c"]);
}

#[test]
fn update_path_of_freehand_object() {
    let mut store = SceneStore::default();
    let stroke = DrawableObject::new("p", Shape::Path { path: vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }] });
    store.add_object(stroke).unwrap();
    let changes = PartialObject { path: Some(vec![PathCommand::Close]), ..Default::default() };
    store.update_object(&id("p"), &changes).unwrap();
    assert_eq!(store.object(&id("p")).unwrap().shape, Shape::Path { path: vec![PathCommand::Close] });
}

// =============================================================
// remove_object
// =============================================================

#[test]
fn remove_selected_clears_selection() {
    let mut store = store_with(&["a", "b"]);
    store.select_object(Some(&id("a")));
    assert!(store.remove_object(&id("a")));
    assert!(store.selected_object_id().is_none());
    assert_eq!(ids(&store), vec!["b"]);
}

#[test]
fn remove_unselected_keeps_selection() {
    let mut store = store_with(&["a", "b"]);
    store.select_object(Some(&id("a")));
    assert!(store.remove_object(&id("b")));
    assert_eq!(store.selected_object_id(), Some(&id("a")));
}

#[test]
fn remove_missing_id_records_nothing() {
    let mut store = store_with(&["a"]);
    store.undo();
    let future = store.history().future_len();
    assert!(!store.remove_object(&id("ghost")));
    assert_eq!(store.history().past_len(), 0);
    assert_eq!(store.history().future_len(), future);
}

#[test]
fn undo_after_remove_restores_position() {
    let mut store = store_with(&["a", "b", "c"]);
    store.remove_object(&id("b"));
    store.undo();
    assert_eq!(ids(&store), vec!["a", "b", "c"]);
}

// =============================================================
// replace_all_objects / new_document
// =============================================================

#[test]
fn replace_all_swaps_list_and_is_undoable() {
    let mut store = store_with(&["a"]);
    store.replace_all_objects(vec![rect("x"), rect("y")]).unwrap();
    assert_eq!(ids(&store), vec!["x", "y"]);
    store.undo();
    assert_eq!(ids(&store), vec!["a"]);
}

#[test]
fn replace_all_with_duplicates_rejects_atomically() {
    let mut store = store_with(&["a"]);
    let err = store.replace_all_objects(vec![rect("x"), rect("x")]).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateId(ref dup) if dup.as_str() == "x"));
    assert_eq!(ids(&store), vec!["a"]);
    assert_eq!(store.history().past_len(), 1);
}

#[test]
fn replace_all_may_reuse_ids_of_replaced_objects() {
    let mut store = store_with(&["a"]);
    store.replace_all_objects(vec![text("a")]).unwrap();
    assert_eq!(store.object(&id("a")).unwrap().kind(), crate::object::ShapeKind::Text);
}

#[test]
fn replace_all_clears_stale_selection() {
    let mut store = store_with(&["a"]);
    store.select_object(Some(&id("a")));
    store.replace_all_objects(vec![rect("z")]).unwrap();
    assert!(store.selected_object_id().is_none());
}

#[test]
fn replace_all_keeps_selection_that_still_exists() {
    let mut store = store_with(&["a"]);
    store.select_object(Some(&id("a")));
    store.replace_all_objects(vec![rect("a"), rect("b")]).unwrap();
    assert_eq!(store.selected_object_id(), Some(&id("a")));
}

#[test]
fn new_document_empties_scene_and_is_undoable() {
    let mut store = store_with(&["a", "b"]);
    store.select_object(Some(&id("b")));
    store.new_document();
    assert!(store.objects().is_empty());
    assert!(store.selected_object_id().is_none());
    store.undo();
    assert_eq!(ids(&store), vec!["a", "b"]);
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_and_redo_on_empty_history_are_noops() {
    let mut store = SceneStore::default();
    assert!(!store.undo());
    assert!(!store.redo());
    assert_eq!(store.revision(), 0);
}

#[test]
fn undo_n_times_returns_to_start_and_redo_n_times_returns_to_end() {
    let mut store = SceneStore::default();
    store.add_object(rect("a")).unwrap();
    store.add_object(text("b")).unwrap();
    store.update_object(&id("a"), &move_to(7.0)).unwrap();
    store.remove_object(&id("b"));
    store.replace_all_objects(vec![rect("c")]).unwrap();
    let end = store.objects().to_vec();

    for _ in 0..5 {
        assert!(store.undo());
    }
    assert!(store.objects().is_empty());
    assert!(!store.undo());

    for _ in 0..5 {
        assert!(store.redo());
    }
    assert_eq!(store.objects(), end.as_slice());
    assert!(!store.redo());
}

#[test]
fn history_is_bounded_to_fifty_steps() {
    let mut store = SceneStore::default();
    for n in 0..60 {
        store.add_object(rect(&n.to_string())).unwrap();
    }
    assert_eq!(store.history().past_len(), 50);

    let mut undone = 0;
    while store.undo() {
        undone += 1;
    }
    assert_eq!(undone, 50);
    // The ten oldest additions can no longer be undone.
    assert_eq!(store.objects().len(), 10);
}

#[test]
fn configured_history_limit_is_honored() {
    let config = SceneConfig { history_limit: 2, ..SceneConfig::default() };
    let mut store = SceneStore::new(config);
    for name in ["a", "b", "c", "d"] {
        store.add_object(rect(name)).unwrap();
    }
    assert_eq!(store.history().past_len(), 2);
    store.undo();
    store.undo();
    assert!(!store.undo());
    assert_eq!(ids(&store), vec!["a", "b"]);
}

#[test]
fn snapshots_are_independent_of_live_objects() {
    let mut store = store_with(&["a"]);
    store.update_object(&id("a"), &move_to(5.0)).unwrap();
    store.update_object(&id("a"), &move_to(9.0)).unwrap();

    let snapshot_lefts: Vec<f64> =
        store.history().past().filter_map(|snap| snap.first()).map(|obj| obj.left).collect();
    assert_eq!(snapshot_lefts, vec![0.0, 5.0]);
}

#[test]
fn undo_clears_selection_of_vanished_object() {
    let mut store = store_with(&["a"]);
    store.select_object(Some(&id("a")));
    store.undo();
    assert!(store.objects().is_empty());
    assert!(store.selected_object_id().is_none());
}

#[test]
fn redo_keeps_selection_of_surviving_object() {
    let mut store = store_with(&["a", "b"]);
    store.select_object(Some(&id("a")));
    store.undo();
    store.redo();
    assert_eq!(store.selected_object_id(), Some(&id("a")));
}

#[test]
fn undo_and_redo_bump_revision() {
    let mut store = store_with(&["a"]);
    let after_add = store.revision();
    store.undo();
    assert_eq!(store.revision(), after_add + 1);
    store.redo();
    assert_eq!(store.revision(), after_add + 2);
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn gesture_coalesces_updates_into_one_step() {
    let mut store = store_with(&["a"]);
    store.begin_gesture();
    for left in 1..=30 {
        store.update_object(&id("a"), &move_to(f64::from(left))).unwrap();
    }
    store.end_gesture();

    assert_eq!(store.object(&id("a")).unwrap().left, 30.0);
    assert_eq!(store.history().past_len(), 2);
    store.undo();
    assert_eq!(store.object(&id("a")).unwrap().left, 0.0);
}

#[test]
fn without_gesture_each_update_is_a_step() {
    let mut store = store_with(&["a"]);
    for left in 1..=3 {
        store.update_object(&id("a"), &move_to(f64::from(left))).unwrap();
    }
    assert_eq!(store.history().past_len(), 4);
}

// =============================================================
// End-to-end
// =============================================================

#[test]
fn add_update_undo_redo_remove_walkthrough() {
    let mut store = SceneStore::default();

    store.add_object(rect("1")).unwrap();
    assert_eq!(ids(&store), vec!["1"]);
    assert_eq!(store.history().past().collect::<Vec<_>>(), vec![&Vec::<DrawableObject>::new()]);

    store.update_object(&id("1"), &move_to(5.0)).unwrap();
    assert_eq!(store.object(&id("1")).unwrap().left, 5.0);
    assert_eq!(store.history().past_len(), 2);
    assert_eq!(store.history().past().nth(1).unwrap()[0].left, 0.0);

    store.undo();
    assert_eq!(store.object(&id("1")).unwrap().left, 0.0);
    assert_eq!(store.history().past_len(), 1);
    assert_eq!(store.history().future().next().unwrap()[0].left, 5.0);

    store.redo();
    assert_eq!(store.object(&id("1")).unwrap().left, 5.0);

    store.select_object(Some(&id("1")));
    store.remove_object(&id("1"));
    assert!(store.objects().is_empty());
    assert!(store.selected_object_id().is_none());
}
