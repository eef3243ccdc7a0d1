//! Handler Dispatch Integration Tests

use crate::helpers::TestDragBuilder;
use draggable::{DragEvent, HandlerPrefix, HandlerRegistry, XY, drag_handler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_prefix_order() {
    let drag = TestDragBuilder::new().build();
    let order = Rc::new(RefCell::new(Vec::new()));

    let mut registry = HandlerRegistry::new();
    for (prefix, label) in [
        (HandlerPrefix::On, "on"),
        (HandlerPrefix::AdapterOn, "adapterOn"),
        (HandlerPrefix::Before, "before"),
        (HandlerPrefix::AdapterBefore, "adapterBefore"),
    ] {
        let order = Rc::clone(&order);
        registry.set(
            DragEvent::Start,
            prefix,
            drag_handler(move |_, _, _| order.borrow_mut().push(label)),
        );
    }
    drag.draggable.set_handlers(registry, false);

    drag.down(0.0, 0.0);
    assert_eq!(*order.borrow(), ["adapterBefore", "before", "adapterOn", "on"]);
}

#[test]
fn test_set_handlers_clear_unset_keeps_adapters() {
    let drag = TestDragBuilder::new().build();
    let adapter_calls = Rc::new(Cell::new(0));
    let calls = Rc::clone(&adapter_calls);
    drag.draggable.set_handler(
        DragEvent::Update,
        HandlerPrefix::AdapterOn,
        drag_handler(move |_, _, _| calls.set(calls.get() + 1)),
    );

    // Replaces every consumer handler, including the recorder
    drag.draggable.set_handlers(HandlerRegistry::new(), true);
    drag.down(0.0, 0.0);

    assert!(drag.log.names().is_empty());
    assert_eq!(adapter_calls.get(), 1);
    assert_eq!(drag.draggable.handler_count(), 1);
}

#[test]
fn test_registry_change_applies_from_next_dispatch() {
    let drag = TestDragBuilder::new().build();
    let weak = Rc::downgrade(&drag.draggable);
    drag.draggable.set_handler(
        DragEvent::Start,
        HandlerPrefix::Before,
        drag_handler(move |_, _, _| {
            if let Some(draggable) = weak.upgrade() {
                draggable.clear_handler(DragEvent::Start, HandlerPrefix::On);
                draggable.clear_handler(DragEvent::Move, HandlerPrefix::On);
            }
        }),
    );

    drag.down(0.0, 0.0);
    drag.move_to(5.0, 0.0);

    // The running row was already taken, so the recorder still saw start
    assert_eq!(drag.log.lifecycle(), ["start"]);
}

#[test]
fn test_handler_reconfigures_through_handle() {
    let drag = TestDragBuilder::new().build();
    drag.draggable.set_handlers(
        HandlerRegistry::new().before(DragEvent::End, |_, _, handle| {
            handle.set_enabled(false);
        }),
        false,
    );

    drag.down(0.0, 0.0);
    drag.up(0.0, 0.0);
    assert!(!drag.draggable.enabled());

    drag.log.clear();
    drag.down(0.0, 0.0);
    assert!(drag.log.names().is_empty());
}

#[test]
fn test_reposition_from_end_handler() {
    let drag = TestDragBuilder::new().build();
    drag.draggable.set_handlers(
        HandlerRegistry::new().before(DragEvent::End, |_, state, handle| {
            // Snap to a 10 unit grid
            let snapped = XY::new(
                (state.position().x / 10.0).round() * 10.0,
                (state.position().y / 10.0).round() * 10.0,
            );
            handle.set_xy(snapped);
        }),
        false,
    );

    drag.down(0.0, 0.0);
    drag.move_to(23.0, 38.0);
    drag.up(23.0, 38.0);

    assert_eq!(drag.xy(), XY::new(20.0, 40.0));
    assert_eq!(drag.draggable.state().start_position(), XY::new(20.0, 40.0));
}

#[test]
fn test_change_only_when_state_differs() {
    let drag = TestDragBuilder::new().build();
    drag.draggable.set_xy(XY::new(5.0, 5.0));
    drag.log.clear();

    drag.draggable.set_xy(XY::new(5.0, 5.0));
    assert_eq!(drag.log.names(), ["update"]);
}

#[test]
fn test_end_drag_from_before_start_skips_remaining_start_slots() {
    let drag = TestDragBuilder::new().build();
    let order = Rc::new(RefCell::new(Vec::new()));
    let before = Rc::clone(&order);
    let on_end = Rc::clone(&order);
    drag.draggable.set_handlers(
        HandlerRegistry::new()
            .before(DragEvent::Start, move |_, _, handle| {
                before.borrow_mut().push("beforeStart");
                handle.end_drag();
            })
            .before(DragEvent::End, move |_, _, _| on_end.borrow_mut().push("beforeEnd")),
        false,
    );

    drag.down(0.0, 0.0);

    assert_eq!(*order.borrow(), ["beforeStart", "beforeEnd"]);
    assert_eq!(drag.log.lifecycle(), ["end"]);
    assert!(!drag.draggable.is_dragging());
    assert_eq!(drag.source.listener_count(), 0);

    drag.move_to(10.0, 0.0);
    assert_eq!(drag.log.count(DragEvent::Move), 0);
}

#[test]
fn test_end_drag_from_before_move_skips_on_move() {
    let drag = TestDragBuilder::new().build();
    drag.draggable.set_handlers(
        HandlerRegistry::new().before(DragEvent::Move, |_, _, handle| handle.end_drag()),
        false,
    );

    drag.down(0.0, 0.0);
    drag.move_to(10.0, 0.0);

    assert_eq!(drag.log.lifecycle(), ["start", "end"]);
    assert_eq!(drag.log.count(DragEvent::End), 1);
}
