//! Unit tests for the handler registry.

use draggable::{DragEvent, HandlerPrefix, HandlerRegistry};

#[test]
fn test_builder_fills_slots() {
    let registry = HandlerRegistry::new()
        .on(DragEvent::Move, |_, _, _| {})
        .before(DragEvent::Move, |_, _, _| {})
        .on(DragEvent::BoundsFail, |_, _, _| {});
    assert_eq!(registry.len(), 3);
    assert!(registry.is_set(DragEvent::Move, HandlerPrefix::Before));
    assert!(!registry.is_set(DragEvent::Move, HandlerPrefix::AdapterOn));
}

#[test]
fn test_row_follows_dispatch_order() {
    let registry = HandlerRegistry::new()
        .on(DragEvent::End, |_, _, _| {})
        .before(DragEvent::End, |_, _, _| {});
    let row = registry.row(DragEvent::End);
    let filled: Vec<bool> = row.iter().map(Option::is_some).collect();
    // adapterBefore, before, adapterOn, on
    assert_eq!(filled, [false, true, false, true]);
}

#[test]
fn test_merge_replaces_adapter_only_when_set() {
    let mut registry = HandlerRegistry::new().with(
        DragEvent::Change,
        HandlerPrefix::AdapterBefore,
        draggable::drag_handler(|_, _, _| {}),
    );
    registry.merge(HandlerRegistry::new().on(DragEvent::Start, |_, _, _| {}), true);
    assert!(registry.is_set(DragEvent::Change, HandlerPrefix::AdapterBefore));
    assert!(registry.is_set(DragEvent::Start, HandlerPrefix::On));

    registry.clear_all();
    assert!(registry.is_empty());
}
