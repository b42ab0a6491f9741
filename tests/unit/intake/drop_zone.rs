use super::*;

#[test]
fn drag_over_highlights_and_prevents_default() {
    let mut zone = DropZone::default();
    let mut ev = DragEvent::new();
    zone.drag_over(&mut ev);
    assert!(ev.default_prevented());
    assert!(zone.is_highlighted());

    zone.drag_leave();
    assert!(!zone.is_highlighted());
}

#[test]
fn drop_clears_highlight_and_reports_whether_files_came_along() {
    let mut zone = DropZone::default();
    zone.drag_over(&mut DragEvent::new());

    let mut empty = DragEvent::new();
    assert!(!zone.drop(&mut empty, 0));
    assert!(empty.default_prevented());
    assert!(!zone.is_highlighted());

    zone.drag_over(&mut DragEvent::new());
    assert!(zone.drop(&mut DragEvent::new(), 2));
    assert!(!zone.is_highlighted());
}
