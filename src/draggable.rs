//! Draggable - movement tracking plus the before/on event protocol.
//!
//! A [`Draggable`] wires a [`PointerCaptureTracker`] to the movement model
//! and dispatches the handler table on every lifecycle step.
//!
//! ## Event Order
//!
//! ```text
//! pointer down  -> [boundsFail] update [change] start
//! pointer move  -> [boundsFail] update [change] move
//! release       -> [boundsFail] update [change] mouseUp, end, update [change]
//! end_drag()    -> end, update [change]
//! set_xy()      -> [boundsFail] update [change]
//! ```
//!
//! Every state replacement raises `update`; `change` only when the snapshot
//! differs from the previous one; `boundsFail` when limits clamped it. The
//! trailing `update` after `end` is the reset that makes the next drag start
//! with a zero delta.
//!
//! Handlers get a copy of the state and a [`DraggableHandle`] for changing
//! configuration. They may call back into the draggable; changes to the
//! handler table take effect from the next dispatch.
//! A handler that ends the drag stops the remaining slots of the
//! `start`/`move`/`mouseUp` event being dispatched; `end` is raised once.

use crate::config::{DraggableOptions, TrackerConfig};
use crate::error::{DragError, DragResult};
use crate::handlers::{self, DragEvent, DragHandler, HandlerPrefix, HandlerRegistry};
use crate::input::buttons::ButtonState;
use crate::input::coords::UnitConverter;
use crate::input::movement::Movement;
use crate::input::subscription::PointerSource;
use crate::input::tracker::{EndReason, PointerCaptureTracker, TrackerCallbacks};
use crate::profile_scope;
use crate::types::{Limits, PointerSample, UnitType, XY};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

// ============================================================================
// State
// ============================================================================

/// What handlers and readers see: kinematics plus button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub movement: Movement,
    pub button_state: ButtonState,
}

impl DragState {
    #[inline]
    pub fn position(&self) -> XY {
        self.movement.position
    }

    #[inline]
    pub fn start_position(&self) -> XY {
        self.movement.start_position
    }

    #[inline]
    pub fn delta(&self) -> XY {
        self.movement.delta
    }

    #[inline]
    pub fn buttons(&self) -> u16 {
        self.button_state.buttons
    }
}

/// Clamp outside of a drag step: a clamped snapshot is treated as a
/// position override (start follows, delta zeroed).
fn confine(movement: Movement, limits: &Limits) -> (Movement, bool) {
    match movement.clamp_to(limits) {
        (clamped, true) => (
            movement.reset_position(clamped.pixel_position, UnitType::Pixel),
            true,
        ),
        unchanged => unchanged,
    }
}

// ============================================================================
// Shared internals
// ============================================================================

struct DraggableShared {
    enabled: Cell<bool>,
    pixel_scale: Cell<XY>,
    limits: Cell<Option<Limits>>,
    state: Cell<DragState>,
    handlers: RefCell<HandlerRegistry>,
    tracker: PointerCaptureTracker,
    /// Number of the drag in progress, from `start` until `end` is raised.
    active_drag: Cell<Option<u64>>,
    drags_started: Cell<u64>,
    detached: Cell<bool>,
}

impl DraggableShared {
    fn handle(self: &Rc<Self>) -> DraggableHandle {
        DraggableHandle {
            shared: Rc::downgrade(self),
        }
    }

    fn dispatch(self: &Rc<Self>, event: DragEvent, native: Option<&PointerSample>) {
        // Row and state are copied out so handlers can mutate both.
        let row = self.handlers.borrow().row(event);
        let state = self.state.get();
        handlers::dispatch(event, &row, native, &state, &self.handle());
    }

    /// Dispatch a drag lifecycle event. Slots stop firing once the drag
    /// that raised it has ended.
    fn dispatch_in_drag(self: &Rc<Self>, event: DragEvent, native: Option<&PointerSample>) {
        let drag = self.active_drag.get();
        if drag.is_none() {
            trace!(%event, "Drag already ended, not dispatching");
            return;
        }
        let row = self.handlers.borrow().row(event);
        let state = self.state.get();
        handlers::dispatch_while(event, &row, native, &state, &self.handle(), || {
            self.active_drag.get() == drag
        });
    }

    /// Swap in a new snapshot and raise `boundsFail`/`update`/`change`.
    fn replace_state(self: &Rc<Self>, next: DragState, clamped: bool, native: Option<&PointerSample>) {
        let previous = self.state.replace(next);
        if clamped {
            debug!(x = next.movement.position.x, y = next.movement.position.y, "Position clamped to limits");
            self.dispatch(DragEvent::BoundsFail, native);
        }
        self.dispatch(DragEvent::Update, native);
        if previous != next {
            self.dispatch(DragEvent::Change, native);
        }
    }

    /// Project a native sample onto the current state. Returns false for
    /// samples with non-finite coordinates, which never enter the model.
    fn apply_sample(self: &Rc<Self>, sample: &PointerSample) -> bool {
        if !sample.client.is_finite() {
            warn!(x = sample.client.x, y = sample.client.y, "Ignoring pointer sample with non-finite coordinates");
            return false;
        }
        let current = self.state.get();
        let limits = self.limits.get();
        let (movement, clamped) = current.movement.advance_within(sample.client, limits.as_ref());
        let next = DragState {
            movement,
            button_state: ButtonState::from_bits(sample.buttons),
        };
        self.replace_state(next, clamped, Some(sample));
        true
    }

    fn on_start(self: &Rc<Self>, sample: &PointerSample) {
        let drag = self.drags_started.get() + 1;
        self.drags_started.set(drag);
        self.active_drag.set(Some(drag));
        self.apply_sample(sample);
        self.dispatch_in_drag(DragEvent::Start, Some(sample));
    }

    fn on_move(self: &Rc<Self>, sample: &PointerSample) {
        profile_scope!("draggable_move");
        if self.apply_sample(sample) {
            self.dispatch_in_drag(DragEvent::Move, Some(sample));
        }
    }

    fn on_mouse_up(self: &Rc<Self>, sample: &PointerSample) {
        self.apply_sample(sample);
        self.dispatch_in_drag(DragEvent::MouseUp, Some(sample));
    }

    fn on_end(self: &Rc<Self>, sample: &PointerSample, reason: EndReason) {
        if self.active_drag.take().is_none() {
            trace!(?reason, "Drag already ended by a handler");
            return;
        }
        debug!(?reason, "Draggable drag ended");
        self.dispatch(DragEvent::End, Some(sample));
        self.settle(sample.buttons);
    }

    /// Terminal reset after a drag: start moves to the final position, the
    /// delta is zeroed and the client position forgotten.
    fn settle(self: &Rc<Self>, buttons: u16) {
        let current = self.state.get();
        let movement = current
            .movement
            .reset_position(current.movement.pixel_position, UnitType::Pixel);
        let next = DragState {
            movement,
            button_state: ButtonState::from_bits(buttons),
        };
        self.replace_state(next, false, None);
    }

    /// Also covers a drag whose release is still being dispatched: the
    /// tracker is already idle then, but `end` has not been raised yet.
    fn end_drag(self: &Rc<Self>) {
        let was_active = self.active_drag.take().is_some();
        if !was_active && !self.tracker.is_dragging() {
            return;
        }
        self.tracker.detach();
        debug!("Drag ended explicitly");
        self.dispatch(DragEvent::End, None);
        self.settle(0);
    }

    fn set_position(self: &Rc<Self>, xy: XY, unit: UnitType) {
        let xy = if xy.is_finite() {
            xy
        } else {
            warn!(x = xy.x, y = xy.y, "Non-finite position, using origin");
            XY::ZERO
        };
        let current = self.state.get();
        let limits = self.limits.get();
        let (movement, clamped) = current.movement.reset_within(xy, unit, limits.as_ref());
        let next = DragState {
            movement,
            button_state: current.button_state,
        };
        self.replace_state(next, clamped, None);
    }

    fn set_pixel_scale(self: &Rc<Self>, scale: XY) {
        let current = self.state.get();
        let movement = match current.movement.with_unit_scale(scale) {
            Ok(movement) => movement,
            Err(err) => {
                warn!(%err, "Keeping previous pixel scale");
                return;
            }
        };
        self.pixel_scale.set(scale);
        let (movement, clamped) = match self.limits.get() {
            Some(limits) => confine(movement, &limits),
            None => (movement, false),
        };
        let next = DragState {
            movement,
            button_state: current.button_state,
        };
        self.replace_state(next, clamped, None);
    }

    fn set_limits(self: &Rc<Self>, limits: Option<Limits>) {
        let limits = limits.map(Limits::normalized);
        self.limits.set(limits);
        let Some(limits) = limits else {
            return;
        };
        let current = self.state.get();
        if let (movement, true) = confine(current.movement, &limits) {
            let next = DragState {
                movement,
                button_state: current.button_state,
            };
            self.replace_state(next, true, None);
        }
    }

    fn state(&self) -> DragState {
        if self.detached.get() {
            warn!("Reading state of a detached draggable");
        }
        self.state.get()
    }
}

// ============================================================================
// Configuration handle
// ============================================================================

/// Configuration access passed to handlers.
///
/// Holds a weak reference: after the draggable is dropped every getter
/// returns its default and every setter is a no-op.
#[derive(Clone)]
pub struct DraggableHandle {
    shared: Weak<DraggableShared>,
}

impl DraggableHandle {
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }

    pub fn enabled(&self) -> bool {
        self.shared.upgrade().is_some_and(|s| s.enabled.get())
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Some(shared) = self.shared.upgrade() {
            shared.enabled.set(enabled);
        }
    }

    pub fn buttons(&self) -> u16 {
        self.shared
            .upgrade()
            .map(|s| s.tracker.accepted_buttons())
            .unwrap_or_default()
    }

    pub fn set_buttons(&self, buttons: u16) {
        if let Some(shared) = self.shared.upgrade() {
            shared.tracker.set_accepted_buttons(buttons);
        }
    }

    pub fn pixel_scale(&self) -> XY {
        self.shared
            .upgrade()
            .map(|s| s.pixel_scale.get())
            .unwrap_or(XY::ONE)
    }

    pub fn set_pixel_scale(&self, scale: XY) {
        if let Some(shared) = self.shared.upgrade() {
            shared.set_pixel_scale(scale);
        }
    }

    pub fn limits(&self) -> Option<Limits> {
        self.shared.upgrade().and_then(|s| s.limits.get())
    }

    pub fn set_limits(&self, limits: Option<Limits>) {
        if let Some(shared) = self.shared.upgrade() {
            shared.set_limits(limits);
        }
    }

    pub fn state(&self) -> DragState {
        self.shared.upgrade().map(|s| s.state()).unwrap_or_default()
    }

    pub fn xy(&self) -> XY {
        self.state().position()
    }

    pub fn set_xy(&self, xy: XY) {
        if let Some(shared) = self.shared.upgrade() {
            shared.set_position(xy, UnitType::Value);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.upgrade().is_some_and(|s| s.tracker.is_dragging())
    }

    /// End the current drag, raising `end` with no native event.
    pub fn end_drag(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.end_drag();
        }
    }
}

impl fmt::Debug for DraggableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ============================================================================
// Draggable
// ============================================================================

/// A draggable value: feed it pointer-downs, read its state, register handlers.
pub struct Draggable {
    shared: Rc<DraggableShared>,
}

impl Draggable {
    /// A draggable with default options listening on `source`.
    pub fn new(source: Rc<dyn PointerSource>) -> Self {
        Self::with_options(DraggableOptions::default(), source)
    }

    pub fn with_options(options: DraggableOptions, source: Rc<dyn PointerSource>) -> Self {
        let options = options.normalized();
        // Normalized options always carry a valid scale and a finite start.
        let movement = Movement::new(options.start_xy, options.start_unit, options.pixel_scale)
            .unwrap_or_default();

        let shared = Rc::new(DraggableShared {
            enabled: Cell::new(options.enabled),
            pixel_scale: Cell::new(options.pixel_scale),
            limits: Cell::new(None),
            state: Cell::new(DragState {
                movement,
                button_state: ButtonState::RELEASED,
            }),
            handlers: RefCell::new(HandlerRegistry::new()),
            tracker: PointerCaptureTracker::new(options.tracker_config(), source),
            active_drag: Cell::new(None),
            drags_started: Cell::new(0),
            detached: Cell::new(false),
        });
        shared.tracker.set_callbacks(Self::tracker_callbacks(&shared));

        if let Some(limits) = options.limits {
            let limits = limits.normalized();
            shared.limits.set(Some(limits));
            let current = shared.state.get();
            let (movement, _) = confine(current.movement, &limits);
            shared.state.set(DragState { movement, ..current });
        }

        Self { shared }
    }

    fn tracker_callbacks(shared: &Rc<DraggableShared>) -> TrackerCallbacks {
        let start = Rc::downgrade(shared);
        let moved = Rc::downgrade(shared);
        let changed = Rc::downgrade(shared);
        let released = Rc::downgrade(shared);
        let ended = Rc::downgrade(shared);

        TrackerCallbacks::new()
            .on_start(move |sample| {
                if let Some(shared) = start.upgrade() {
                    shared.on_start(sample);
                }
            })
            .on_move(move |sample| {
                if let Some(shared) = moved.upgrade() {
                    shared.on_move(sample);
                }
            })
            .on_button_change(move |sample| {
                if let Some(shared) = changed.upgrade() {
                    shared.on_move(sample);
                }
            })
            .on_mouse_up(move |sample| {
                if let Some(shared) = released.upgrade() {
                    shared.on_mouse_up(sample);
                }
            })
            .on_end(move |sample, reason| {
                if let Some(shared) = ended.upgrade() {
                    shared.on_end(sample, reason);
                }
            })
    }

    /// Configuration handle, the same one handlers receive.
    pub fn handle(&self) -> DraggableHandle {
        self.shared.handle()
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// Wire this to the element's native pointer-down listener.
    ///
    /// On a detached draggable this logs a warning and does nothing.
    pub fn drag_start_handler(&self, sample: &PointerSample) {
        if let Err(err) = self.try_drag_start(sample) {
            warn!(%err, "drag_start_handler used on a detached draggable");
        }
    }

    /// Like [`drag_start_handler`](Self::drag_start_handler) but reports
    /// use after detach as an error.
    pub fn try_drag_start(&self, sample: &PointerSample) -> DragResult<()> {
        profile_scope!("drag_start_handler");
        if self.shared.detached.get() {
            return Err(DragError::Detached);
        }
        if !self.shared.enabled.get() {
            trace!("Pointer down ignored: draggable disabled");
            return Ok(());
        }
        self.shared.tracker.handle_pointer_down(sample);
        Ok(())
    }

    /// End the current drag (if any), raising `end` with no native event.
    /// The draggable stays usable.
    pub fn end_drag(&self) {
        self.shared.end_drag();
    }

    /// Tear down: end any drag in progress, drop the window listeners and
    /// clear every handler. Idempotent.
    pub fn detach(&self) {
        if self.shared.detached.get() {
            trace!("Draggable already detached");
            return;
        }
        self.shared.end_drag();
        self.shared.tracker.detach();
        self.shared.tracker.set_callbacks(TrackerCallbacks::default());
        self.shared.handlers.borrow_mut().clear_all();
        self.shared.detached.set(true);
        debug!("Draggable detached");
    }

    pub fn is_detached(&self) -> bool {
        self.shared.detached.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.tracker.is_dragging()
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    /// Install handlers from `registry`. With `clear_unset`, consumer slots
    /// the registry leaves empty are cleared.
    pub fn set_handlers(&self, registry: HandlerRegistry, clear_unset: bool) {
        self.shared.handlers.borrow_mut().merge(registry, clear_unset);
    }

    pub fn set_handler(&self, event: DragEvent, prefix: HandlerPrefix, handler: DragHandler) {
        self.shared.handlers.borrow_mut().set(event, prefix, handler);
    }

    pub fn clear_handler(&self, event: DragEvent, prefix: HandlerPrefix) {
        self.shared.handlers.borrow_mut().clear(event, prefix);
    }

    pub fn handler_count(&self) -> usize {
        self.shared.handlers.borrow().len()
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.set(enabled);
    }

    pub fn buttons(&self) -> u16 {
        self.shared.tracker.accepted_buttons()
    }

    pub fn set_buttons(&self, buttons: u16) {
        self.shared.tracker.set_accepted_buttons(buttons);
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        self.shared.tracker.config()
    }

    pub fn set_tracker_config(&self, config: TrackerConfig) {
        self.shared.tracker.set_config(config);
    }

    pub fn pixel_scale(&self) -> XY {
        self.shared.pixel_scale.get()
    }

    /// Non-finite or non-positive scales are rejected with a warning and
    /// the previous scale is kept.
    pub fn set_pixel_scale(&self, scale: XY) {
        if !UnitConverter::is_valid_scale(scale) {
            warn!(x = scale.x, y = scale.y, "Invalid pixel scale ignored");
            return;
        }
        self.shared.set_pixel_scale(scale);
    }

    pub fn limits(&self) -> Option<Limits> {
        self.shared.limits.get()
    }

    /// Inverted bounds are swapped; the current position is clamped.
    pub fn set_limits(&self, limits: Option<Limits>) {
        self.shared.set_limits(limits);
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// A copy of the current state.
    pub fn state(&self) -> DragState {
        self.shared.state()
    }

    pub fn xy(&self) -> XY {
        self.shared.state().position()
    }

    /// Override the logical position. Zeroes the delta.
    pub fn set_xy(&self, xy: XY) {
        self.shared.set_position(xy, UnitType::Value);
    }

    pub fn set_position(&self, xy: XY, unit: UnitType) {
        self.shared.set_position(xy, unit);
    }
}

impl fmt::Debug for Draggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draggable")
            .field("enabled", &self.shared.enabled.get())
            .field("detached", &self.shared.detached.get())
            .field("tracker", &self.shared.tracker)
            .field("state", &self.shared.state.get())
            .field("handlers", &*self.shared.handlers.borrow())
            .finish()
    }
}
