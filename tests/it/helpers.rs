//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestDragBuilder` - Builder for a draggable wired to an in-memory source
//! - `EventLog` - Records every dispatched event with its state snapshot
//! - `init_tracing()` - Opt-in log output via `RUST_LOG`

use draggable::{
    DragEvent, DragState, Draggable, DraggableOptions, HandlerRegistry, Limits,
    LocalPointerSource, PointerSample, XY, button,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test writer. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// EventLog - records dispatched events
// ============================================================================

#[derive(Clone, Debug)]
pub struct Recorded {
    pub event: DragEvent,
    pub state: DragState,
    pub native: Option<PointerSample>,
}

/// Shared recorder. Clones append to the same log.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<Recorded>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a recording `on` handler for every event.
    pub fn registry(&self) -> HandlerRegistry {
        DragEvent::ALL
            .into_iter()
            .fold(HandlerRegistry::new(), |registry, event| {
                let entries = Rc::clone(&self.entries);
                registry.on(event, move |native, state, _| {
                    entries.borrow_mut().push(Recorded {
                        event,
                        state: *state,
                        native: native.copied(),
                    });
                })
            })
    }

    pub fn entries(&self) -> Vec<Recorded> {
        self.entries.borrow().clone()
    }

    /// Event names in dispatch order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.borrow().iter().map(|r| r.event.name()).collect()
    }

    /// Only start/move/mouseUp/end, in order.
    pub fn lifecycle(&self) -> Vec<&'static str> {
        self.entries
            .borrow()
            .iter()
            .filter(|r| {
                matches!(
                    r.event,
                    DragEvent::Start | DragEvent::Move | DragEvent::MouseUp | DragEvent::End
                )
            })
            .map(|r| r.event.name())
            .collect()
    }

    pub fn count(&self, event: DragEvent) -> usize {
        self.entries.borrow().iter().filter(|r| r.event == event).count()
    }

    pub fn states(&self, event: DragEvent) -> Vec<DragState> {
        self.entries
            .borrow()
            .iter()
            .filter(|r| r.event == event)
            .map(|r| r.state)
            .collect()
    }

    pub fn last(&self, event: DragEvent) -> Option<Recorded> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|r| r.event == event)
            .cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

// ============================================================================
// TestDragBuilder - draggable plus source plus recorder
// ============================================================================

/// Builder for a recorded draggable.
///
/// # Example
/// ```ignore
/// let drag = TestDragBuilder::new()
///     .with_pixel_scale(2.0, 2.0)
///     .with_limits(Limits::x_only(0.0, 50.0))
///     .build();
/// drag.down(0.0, 0.0);
/// drag.move_to(10.0, 0.0);
/// ```
#[derive(Default)]
pub struct TestDragBuilder {
    options: DraggableOptions,
}

impl TestDragBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: DraggableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_pixel_scale(mut self, x: f64, y: f64) -> Self {
        self.options.pixel_scale = XY::new(x, y);
        self
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.options.start_xy = XY::new(x, y);
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.options.limits = Some(limits);
        self
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.options.buttons = buttons;
        self
    }

    pub fn with_phantom_release(mut self, enabled: bool) -> Self {
        self.options.mouse_up_on_phantom_move = enabled;
        self
    }

    pub fn with_context_menu_suppressed(mut self) -> Self {
        self.options.suppress_context_menu = true;
        self
    }

    pub fn build(self) -> TestDrag {
        init_tracing();
        let source = LocalPointerSource::new();
        let draggable = Rc::new(Draggable::with_options(
            self.options,
            Rc::new(source.clone()),
        ));
        let log = EventLog::new();
        draggable.set_handlers(log.registry(), false);
        TestDrag {
            draggable,
            source,
            log,
        }
    }
}

/// A draggable driven through an in-memory window.
pub struct TestDrag {
    pub draggable: Rc<Draggable>,
    pub source: LocalPointerSource,
    pub log: EventLog,
}

impl TestDrag {
    /// Pointer-down with the primary button.
    pub fn down(&self, x: f64, y: f64) {
        self.down_with(x, y, button::PRIMARY);
    }

    pub fn down_with(&self, x: f64, y: f64, buttons: u16) {
        self.draggable
            .drag_start_handler(&PointerSample::new(x, y, buttons));
    }

    /// Move with the primary button held.
    pub fn move_to(&self, x: f64, y: f64) {
        self.move_with(x, y, button::PRIMARY);
    }

    pub fn move_with(&self, x: f64, y: f64, buttons: u16) {
        self.source.pointer_move(PointerSample::new(x, y, buttons));
    }

    /// Release every button.
    pub fn up(&self, x: f64, y: f64) {
        self.up_with(x, y, button::NONE);
    }

    pub fn up_with(&self, x: f64, y: f64, buttons: u16) {
        self.source.pointer_up(PointerSample::new(x, y, buttons));
    }

    pub fn xy(&self) -> XY {
        self.draggable.xy()
    }
}

/// Compare points with a tolerance.
pub fn assert_xy_near(actual: XY, expected: XY) {
    assert!(
        actual.approx_eq(expected, 1e-9),
        "expected {expected:?}, got {actual:?}"
    );
}
