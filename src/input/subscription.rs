//! Window-level event subscriptions.
//!
//! A [`PointerSource`] stands for the global pointer-event stream (the
//! browser `window`). Subscribing returns a [`Subscription`], an owned
//! cancellation handle: cancelling it, or dropping it, removes the listener.
//! Cancelling twice is a no-op.
//!
//! [`LocalPointerSource`] is an in-memory source for hosts that feed events
//! themselves (native shells, tests). The browser source lives in `web`.

use crate::types::PointerSample;
use slotmap::{DefaultKey, SlotMap};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

// ============================================================================
// Events
// ============================================================================

/// Request to open a context menu; listeners may suppress it.
#[derive(Debug, Default)]
pub struct ContextMenuRequest {
    pub sample: PointerSample,
    prevented: Cell<bool>,
}

impl ContextMenuRequest {
    pub fn new(sample: PointerSample) -> Self {
        Self {
            sample,
            prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

/// An event delivered to window listeners.
#[derive(Debug, Clone, Copy)]
pub enum WindowEvent<'a> {
    PointerMove(&'a PointerSample),
    PointerUp(&'a PointerSample),
    ContextMenu(&'a ContextMenuRequest),
}

/// Listener registered on a [`PointerSource`].
pub type WindowListener = Rc<dyn Fn(WindowEvent<'_>)>;

/// Box a closure as a [`WindowListener`].
pub fn window_listener(f: impl Fn(WindowEvent<'_>) + 'static) -> WindowListener {
    Rc::new(f)
}

/// The global pointer-event stream.
pub trait PointerSource {
    /// Register `listener` for pointer-move, pointer-up and context-menu
    /// events until the returned subscription is cancelled or dropped.
    fn subscribe(&self, listener: WindowListener) -> Subscription;
}

// ============================================================================
// Subscription
// ============================================================================

/// Owned handle to a registered listener. Released on cancel or drop.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that holds nothing.
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Remove the listener. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// ============================================================================
// In-memory source
// ============================================================================

type ListenerTable = RefCell<SlotMap<DefaultKey, WindowListener>>;

/// A window stand-in that hosts drive by calling [`dispatch`](Self::dispatch).
///
/// Clones share the same listener table.
#[derive(Clone, Default)]
pub struct LocalPointerSource {
    listeners: Rc<ListenerTable>,
}

impl LocalPointerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners. Zero between drags means nothing leaked.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every listener registered when dispatch starts.
    ///
    /// Listeners cancelled by an earlier listener during the same dispatch
    /// are skipped; listeners added during dispatch see the next event.
    pub fn dispatch(&self, event: WindowEvent<'_>) {
        let snapshot: Vec<(DefaultKey, WindowListener)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(key, listener)| (key, Rc::clone(listener)))
            .collect();

        for (key, listener) in snapshot {
            if !self.listeners.borrow().contains_key(key) {
                continue;
            }
            listener(event);
        }
    }

    pub fn pointer_move(&self, sample: PointerSample) {
        self.dispatch(WindowEvent::PointerMove(&sample));
    }

    pub fn pointer_up(&self, sample: PointerSample) {
        self.dispatch(WindowEvent::PointerUp(&sample));
    }

    /// Deliver a context-menu request. Returns true if a listener suppressed it.
    pub fn context_menu(&self, sample: PointerSample) -> bool {
        let request = ContextMenuRequest::new(sample);
        self.dispatch(WindowEvent::ContextMenu(&request));
        request.is_default_prevented()
    }
}

impl PointerSource for LocalPointerSource {
    fn subscribe(&self, listener: WindowListener) -> Subscription {
        let key = self.listeners.borrow_mut().insert(listener);
        let table: Weak<ListenerTable> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().remove(key);
            }
        })
    }
}

impl fmt::Debug for LocalPointerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPointerSource")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
