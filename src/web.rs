//! Browser integration via `web-sys`.
//!
//! [`WindowPointerSource`] registers `mousemove`, `mouseup` and
//! `contextmenu` listeners on the browser window for the lifetime of a
//! [`Subscription`]. [`listen_pointer_down`] wires an element's `mousedown`
//! to a [`Draggable`].

use crate::draggable::Draggable;
use crate::input::subscription::{
    ContextMenuRequest, PointerSource, Subscription, WindowEvent, WindowListener,
};
use crate::types::{EventTargetId, PointerSample};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent, Window};

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

impl From<&MouseEvent> for PointerSample {
    fn from(event: &MouseEvent) -> Self {
        PointerSample::new(event.client_x() as f64, event.client_y() as f64, event.buttons())
    }
}

/// Listeners registered on one target, removed together.
struct Registration {
    target: EventTarget,
    listeners: Vec<(&'static str, MouseClosure)>,
}

impl Registration {
    fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: Vec::new(),
        }
    }

    fn add(&mut self, kind: &'static str, closure: MouseClosure) -> Result<(), JsValue> {
        self.target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push((kind, closure));
        Ok(())
    }

    fn remove(self) {
        for (kind, closure) in self.listeners {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                warn!(kind, ?err, "Failed to remove event listener");
            }
            // The subscription may be cancelled from inside this closure; hand
            // it to the JS GC instead of freeing it while it runs.
            drop(closure.into_js_value());
        }
    }

    fn into_subscription(self) -> Subscription {
        Subscription::new(move || self.remove())
    }
}

// ============================================================================
// Window source
// ============================================================================

/// The browser window as a [`PointerSource`].
#[derive(Clone, Debug)]
pub struct WindowPointerSource {
    window: Window,
}

impl WindowPointerSource {
    /// The current window, or `None` outside a browser main thread.
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }

    pub fn from_window(window: Window) -> Self {
        Self { window }
    }

    fn register(
        &self,
        listener: WindowListener,
        registration: &mut Registration,
    ) -> Result<(), JsValue> {
        let on_move = Rc::clone(&listener);
        registration.add(
            "mousemove",
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let sample = PointerSample::from(&event);
                on_move(WindowEvent::PointerMove(&sample));
            }) as Box<dyn FnMut(_)>),
        )?;

        let on_up = Rc::clone(&listener);
        registration.add(
            "mouseup",
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let sample = PointerSample::from(&event);
                on_up(WindowEvent::PointerUp(&sample));
            }) as Box<dyn FnMut(_)>),
        )?;

        registration.add(
            "contextmenu",
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let request = ContextMenuRequest::new(PointerSample::from(&event));
                listener(WindowEvent::ContextMenu(&request));
                if request.is_default_prevented() {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(_)>),
        )?;

        Ok(())
    }
}

impl PointerSource for WindowPointerSource {
    fn subscribe(&self, listener: WindowListener) -> Subscription {
        let mut registration = Registration::new(self.window.clone().into());
        match self.register(listener, &mut registration) {
            Ok(()) => registration.into_subscription(),
            Err(err) => {
                warn!(?err, "Failed to subscribe to window pointer events");
                registration.remove();
                Subscription::empty()
            }
        }
    }
}

// ============================================================================
// Element binding
// ============================================================================

/// Start drags on `draggable` from `target`'s `mousedown` events.
///
/// Pointer-down samples carry `id` as their target, so handlers sharing a
/// draggable across elements can tell which one started the drag.
///
/// The listener holds a weak reference: dropping the draggable turns it
/// into a no-op. Cancel or drop the subscription to remove it.
pub fn listen_pointer_down(
    target: &EventTarget,
    id: EventTargetId,
    draggable: &Rc<Draggable>,
) -> Result<Subscription, JsValue> {
    let weak = Rc::downgrade(draggable);
    let mut registration = Registration::new(target.clone());
    registration.add(
        "mousedown",
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(draggable) = weak.upgrade() {
                draggable.drag_start_handler(&PointerSample::from(&event).with_target(id));
            }
        }) as Box<dyn FnMut(_)>),
    )?;
    debug!(element = id, "Pointer-down listener attached");
    Ok(registration.into_subscription())
}
