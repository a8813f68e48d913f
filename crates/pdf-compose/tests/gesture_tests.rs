use pdf_compose::*;

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

#[test]
fn test_press_on_thumbnail_selects() {
    let mut gesture = GestureController::default();
    assert_eq!(gesture.press(p(10.0, 10.0), Some(2)), GestureOutcome::Selected(2));
    assert!(matches!(gesture.state(), GestureState::Pressed(_)));
}

#[test]
fn test_press_on_empty_space_stays_idle() {
    let mut gesture = GestureController::default();
    assert_eq!(gesture.press(p(10.0, 10.0), None), GestureOutcome::None);
    assert_eq!(gesture.state(), GestureState::Idle);
    assert_eq!(gesture.release(p(10.0, 10.0), None), GestureOutcome::None);
}

#[test]
fn test_sub_threshold_motion_is_a_click() {
    let mut gesture = GestureController::new(10.0);
    gesture.press(p(100.0, 100.0), Some(0));

    // Exactly on the threshold does not start a drag
    assert_eq!(gesture.drag_to(p(110.0, 95.0), Some(1)), GestureOutcome::None);
    assert!(!gesture.is_dragging());

    assert_eq!(gesture.release(p(110.0, 95.0), Some(1)), GestureOutcome::Clicked(0));
    assert_eq!(gesture.state(), GestureState::Idle);
}

#[test]
fn test_drag_onto_other_thumbnail_reorders() {
    let mut gesture = GestureController::new(10.0);
    gesture.press(p(0.0, 0.0), Some(0));

    assert_eq!(gesture.drag_to(p(0.0, 11.0), Some(0)), GestureOutcome::DragStarted(0));
    assert_eq!(gesture.drag_to(p(40.0, 11.0), Some(3)), GestureOutcome::TargetChanged(Some(3)));
    assert_eq!(gesture.drag_to(p(42.0, 12.0), Some(3)), GestureOutcome::None);

    assert_eq!(
        gesture.release(p(42.0, 12.0), Some(3)),
        GestureOutcome::Reorder { from: 0, to: 3 }
    );
    assert_eq!(gesture.state(), GestureState::Idle);
}

#[test]
fn test_release_without_final_move_still_counts() {
    let mut gesture = GestureController::new(10.0);
    gesture.press(p(0.0, 0.0), Some(4));
    assert_eq!(
        gesture.release(p(300.0, 0.0), Some(1)),
        GestureOutcome::Reorder { from: 4, to: 1 }
    );
}

#[test]
fn test_drop_on_origin_or_nothing_cancels() {
    let mut gesture = GestureController::new(10.0);
    gesture.press(p(0.0, 0.0), Some(1));
    gesture.drag_to(p(50.0, 0.0), Some(2));
    assert_eq!(gesture.release(p(2.0, 0.0), Some(1)), GestureOutcome::Cancelled);

    gesture.press(p(0.0, 0.0), Some(1));
    gesture.drag_to(p(50.0, 0.0), None);
    assert_eq!(gesture.release(p(50.0, 0.0), None), GestureOutcome::Cancelled);
}

#[test]
fn test_cancel_returns_to_idle() {
    let mut gesture = GestureController::default();
    assert_eq!(gesture.cancel(), GestureOutcome::None);

    gesture.press(p(0.0, 0.0), Some(0));
    gesture.drag_to(p(50.0, 0.0), Some(1));
    assert_eq!(gesture.cancel(), GestureOutcome::Cancelled);
    assert!(!gesture.is_active());
}

#[test]
fn test_visual_states_during_drag() {
    let mut gesture = GestureController::default();
    assert_eq!(gesture.visual_state(0), None);

    gesture.press(p(0.0, 0.0), Some(0));
    assert_eq!(gesture.visual_state(0), Some(ThumbnailVisual::Selected));
    // Not a drag yet, so nothing is a drop target
    assert_eq!(gesture.visual_state(1), Some(ThumbnailVisual::Normal));

    gesture.drag_to(p(50.0, 0.0), Some(2));
    assert_eq!(gesture.visual_state(0), Some(ThumbnailVisual::Selected));
    assert_eq!(gesture.visual_state(2), Some(ThumbnailVisual::DropTarget));
    assert_eq!(gesture.visual_state(1), Some(ThumbnailVisual::Normal));

    gesture.drag_to(p(1.0, 0.0), Some(0));
    assert_eq!(gesture.visual_state(0), Some(ThumbnailVisual::Selected));
    assert_eq!(gesture.visual_state(2), Some(ThumbnailVisual::Normal));
}

// =============================================================================
// Grid layout
// =============================================================================

fn layout() -> GridLayout {
    // Cells are 14 + 150 + 8 = 172 wide and 208 tall
    GridLayout::fit(p(0.0, 0.0), 600.0, 150.0, 200.0, 14.0, 8.0)
}

#[test]
fn test_fit_columns() {
    assert_eq!(layout().columns, 3);
    assert_eq!(
        GridLayout::fit(p(0.0, 0.0), 50.0, 150.0, 200.0, 14.0, 8.0).columns,
        1
    );
}

#[test]
fn test_rows_include_trailing_slot() {
    let grid = layout();
    assert_eq!(grid.rows(0), 1);
    assert_eq!(grid.rows(2), 1);
    assert_eq!(grid.rows(3), 2);
    assert_eq!(grid.rows(5), 2);
}

#[test]
fn test_index_at_hits_thumbnails_only() {
    let grid = layout();

    assert_eq!(grid.index_at(p(20.0, 10.0), 5), Some(0));
    assert_eq!(grid.index_at(p(5.0, 10.0), 5), None);
    assert_eq!(grid.index_at(p(190.0, 210.0), 5), Some(4));
    // Cell 5 only holds the trailing slot
    assert_eq!(grid.index_at(p(372.0, 210.0), 5), None);
    assert_eq!(grid.index_at(p(-1.0, 10.0), 5), None);
    assert_eq!(grid.index_at(p(20.0, 10.0), 0), None);
}

#[test]
fn test_slot_at() {
    let grid = layout();

    assert_eq!(grid.slot_at(p(5.0, 10.0), 5), Some(0));
    assert_eq!(grid.slot_at(p(176.0, 10.0), 5), Some(1));
    assert_eq!(grid.slot_at(p(346.0, 210.0), 5), Some(5));
    assert_eq!(grid.slot_at(p(20.0, 10.0), 5), None);
}

#[test]
fn test_thumbnail_rect_round_trips_with_index_at() {
    let grid = GridLayout::fit(p(30.0, 40.0), 900.0, 120.0, 160.0, 10.0, 6.0);
    for index in 0..12 {
        let rect = grid.thumbnail_rect(index);
        let center = p(
            rect.min.x + rect.width() / 2.0,
            rect.min.y + rect.height() / 2.0,
        );
        assert_eq!(grid.index_at(center, 12), Some(index));
    }
}
