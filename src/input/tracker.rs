//! Pointer capture tracker - decides when a drag is active.
//!
//! The tracker owns the window-level subscription for the duration of one
//! drag. It knows nothing about coordinates; it relays qualifying events to
//! its callbacks and filters the noisy ones:
//!
//! - a pointer-down while already dragging is a button change, not a new start
//! - a release with another accepted button still held keeps the drag alive
//! - a move with no accepted button held is a missed release (phantom move),
//!   if `mouse_up_on_phantom_move` is set
//!
//! ## Performance Notes
//!
//! Move handling is a hot path. Enable profiling with
//! `cargo build --features profiling` to see timing.

use crate::config::TrackerConfig;
use crate::input::state::{CapturePhase, SessionId};
use crate::input::subscription::{PointerSource, Subscription, WindowEvent, window_listener};
use crate::profile_scope;
use crate::types::PointerSample;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Why a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Release event with no accepted button left
    Released,
    /// Move event with no accepted button held
    PhantomMove,
}

pub type TrackerCallback = Rc<dyn Fn(&PointerSample)>;
pub type TrackerEndCallback = Rc<dyn Fn(&PointerSample, EndReason)>;

/// Callbacks raised by the tracker. Unset callbacks are skipped.
#[derive(Clone, Default)]
pub struct TrackerCallbacks {
    pub on_start: Option<TrackerCallback>,
    pub on_move: Option<TrackerCallback>,
    pub on_button_change: Option<TrackerCallback>,
    pub on_mouse_up: Option<TrackerCallback>,
    pub on_end: Option<TrackerEndCallback>,
}

impl TrackerCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl Fn(&PointerSample) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    pub fn on_move(mut self, f: impl Fn(&PointerSample) + 'static) -> Self {
        self.on_move = Some(Rc::new(f));
        self
    }

    pub fn on_button_change(mut self, f: impl Fn(&PointerSample) + 'static) -> Self {
        self.on_button_change = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_up(mut self, f: impl Fn(&PointerSample) + 'static) -> Self {
        self.on_mouse_up = Some(Rc::new(f));
        self
    }

    pub fn on_end(mut self, f: impl Fn(&PointerSample, EndReason) + 'static) -> Self {
        self.on_end = Some(Rc::new(f));
        self
    }
}

/// One drag: the session id and the window listener it owns.
struct DragSession {
    id: SessionId,
    subscription: Subscription,
}

struct TrackerShared {
    config: Cell<TrackerConfig>,
    phase: Cell<CapturePhase>,
    session: RefCell<Option<DragSession>>,
    callbacks: RefCell<TrackerCallbacks>,
    next_session: Cell<SessionId>,
    source: Rc<dyn PointerSource>,
}

/// Window-level pointer capture for one drag at a time.
///
/// All methods take `&self` so callbacks may call back into the tracker
/// (for example `detach` from an `on_move` callback).
pub struct PointerCaptureTracker {
    shared: Rc<TrackerShared>,
}

impl PointerCaptureTracker {
    pub fn new(config: TrackerConfig, source: Rc<dyn PointerSource>) -> Self {
        Self {
            shared: Rc::new(TrackerShared {
                config: Cell::new(config),
                phase: Cell::new(CapturePhase::Idle),
                session: RefCell::new(None),
                callbacks: RefCell::new(TrackerCallbacks::default()),
                next_session: Cell::new(1),
                source,
            }),
        }
    }

    pub fn config(&self) -> TrackerConfig {
        self.shared.config.get()
    }

    /// Takes effect for the next event, including mid-drag.
    pub fn set_config(&self, config: TrackerConfig) {
        self.shared.config.set(config);
    }

    pub fn accepted_buttons(&self) -> u16 {
        self.shared.config.get().accepted_buttons
    }

    pub fn set_accepted_buttons(&self, buttons: u16) {
        let config = self.shared.config.get().with_buttons(buttons);
        self.shared.config.set(config);
    }

    /// Replace all callbacks.
    pub fn set_callbacks(&self, callbacks: TrackerCallbacks) {
        *self.shared.callbacks.borrow_mut() = callbacks;
    }

    pub fn phase(&self) -> CapturePhase {
        self.shared.phase.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.phase.get().is_dragging()
    }

    /// Entry point for the element's pointer-down listener.
    pub fn handle_pointer_down(&self, sample: &PointerSample) {
        self.shared.handle_down(sample);
    }

    /// Drop the window listeners and return to idle without raising `end`.
    /// Safe to call any number of times, from any state.
    pub fn detach(&self) {
        self.shared.detach();
    }
}

impl fmt::Debug for PointerCaptureTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCaptureTracker")
            .field("config", &self.shared.config.get())
            .field("phase", &self.shared.phase.get())
            .finish()
    }
}

impl TrackerShared {
    fn callback(&self, pick: fn(&TrackerCallbacks) -> Option<TrackerCallback>) -> Option<TrackerCallback> {
        pick(&self.callbacks.borrow())
    }

    fn emit(&self, pick: fn(&TrackerCallbacks) -> Option<TrackerCallback>, sample: &PointerSample) {
        // Cloned out first: the callback may replace callbacks or detach.
        if let Some(callback) = self.callback(pick) {
            callback(sample);
        }
    }

    fn set_phase_buttons(&self, buttons: u16) {
        let mut phase = self.phase.get();
        phase.set_buttons(buttons);
        self.phase.set(phase);
    }

    fn handle_down(self: &Rc<Self>, sample: &PointerSample) {
        profile_scope!("tracker_pointer_down");

        let config = self.config.get();
        if !sample.has_any(config.accepted_buttons) {
            trace!(buttons = sample.buttons, "Pointer down ignored: no accepted button");
            return;
        }

        if let CapturePhase::Dragging { session, .. } = self.phase.get() {
            debug!(session, buttons = sample.buttons, "Button change during drag");
            self.set_phase_buttons(sample.buttons);
            self.emit(|c| c.on_button_change.clone(), sample);
            return;
        }

        let id = self.open_session();
        self.phase.set(CapturePhase::Dragging {
            session: id,
            buttons: sample.buttons,
        });
        debug!(session = id, buttons = sample.buttons, "Drag started");
        self.emit(|c| c.on_start.clone(), sample);
    }

    /// Subscribe to the window for a new session, cancelling any prior one first.
    fn open_session(self: &Rc<Self>) -> SessionId {
        let previous = self.session.borrow_mut().take();
        if let Some(mut previous) = previous {
            debug!(session = previous.id, "Cancelling stale session");
            previous.subscription.cancel();
        }

        let id = self.next_session.get();
        self.next_session.set(id + 1);

        let weak = Rc::downgrade(self);
        let subscription = self.source.subscribe(window_listener(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_window_event(id, event);
            }
        }));
        *self.session.borrow_mut() = Some(DragSession { id, subscription });
        id
    }

    fn on_window_event(&self, id: SessionId, event: WindowEvent<'_>) {
        if self.phase.get().session() != Some(id) {
            return;
        }
        match event {
            WindowEvent::PointerMove(sample) => self.handle_move(sample),
            WindowEvent::PointerUp(sample) => self.handle_up(sample),
            WindowEvent::ContextMenu(request) => {
                if self.config.get().suppress_context_menu {
                    trace!(session = id, "Context menu suppressed during drag");
                    request.prevent_default();
                }
            }
        }
    }

    fn handle_move(&self, sample: &PointerSample) {
        profile_scope!("tracker_pointer_move");

        let config = self.config.get();
        if config.mouse_up_on_phantom_move && !sample.has_any(config.accepted_buttons) {
            self.finish(sample, EndReason::PhantomMove);
            return;
        }

        self.set_phase_buttons(sample.buttons);
        trace!(x = sample.client.x, y = sample.client.y, "Pointer move");
        self.emit(|c| c.on_move.clone(), sample);
    }

    fn handle_up(&self, sample: &PointerSample) {
        let config = self.config.get();
        if sample.has_any(config.accepted_buttons) {
            debug!(buttons = sample.buttons, "Partial release, drag continues");
            self.set_phase_buttons(sample.buttons);
            self.emit(|c| c.on_button_change.clone(), sample);
            return;
        }
        self.finish(sample, EndReason::Released);
    }

    /// Close the session, raise `mouse_up` then `end`, then unsubscribe.
    ///
    /// The session is taken before the callbacks run, so a callback that
    /// starts a new drag gets a fresh session that is not cancelled here.
    fn finish(&self, sample: &PointerSample, reason: EndReason) {
        let session = self.session.borrow_mut().take();
        self.phase.set(CapturePhase::Idle);
        debug!(session = session.as_ref().map(|s| s.id), ?reason, "Drag ended");

        self.emit(|c| c.on_mouse_up.clone(), sample);
        let on_end = self.callbacks.borrow().on_end.clone();
        if let Some(on_end) = on_end {
            on_end(sample, reason);
        }

        drop(session);
    }

    fn detach(&self) {
        let session = self.session.borrow_mut().take();
        self.phase.set(CapturePhase::Idle);
        if let Some(mut session) = session {
            debug!(session = session.id, "Tracker detached mid-drag");
            session.subscription.cancel();
        }
    }
}
