//! Handler registry and dispatch.
//!
//! Handlers live in a fixed table indexed by `(DragEvent, HandlerPrefix)`.
//! Dispatching an event walks the four prefix slots of that event in
//! [`HandlerPrefix::DISPATCH_ORDER`]:
//!
//! ```text
//! adapterBefore -> before -> adapterOn -> on
//! ```
//!
//! Adapter slots are reserved for framework bindings (re-render hooks);
//! consumers use `before`/`on`.

use crate::constants::SLOW_DISPATCH_MS;
use crate::draggable::{DragState, DraggableHandle};
use crate::profile_scope;
use crate::types::PointerSample;
use std::fmt;
use std::rc::Rc;

/// Lifecycle events a draggable raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragEvent {
    /// A drag was accepted
    Start,
    /// The pointer moved (or the button set changed) during a drag
    Move,
    /// The drag finished
    End,
    /// The state snapshot was replaced
    Update,
    /// The state snapshot was replaced with a different value
    Change,
    /// The button was released (not raised when detaching)
    MouseUp,
    /// The position was clamped into the configured limits
    BoundsFail,
}

impl DragEvent {
    pub const ALL: [DragEvent; 7] = [
        DragEvent::Start,
        DragEvent::Move,
        DragEvent::End,
        DragEvent::Update,
        DragEvent::Change,
        DragEvent::MouseUp,
        DragEvent::BoundsFail,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DragEvent::Start => "start",
            DragEvent::Move => "move",
            DragEvent::End => "end",
            DragEvent::Update => "update",
            DragEvent::Change => "change",
            DragEvent::MouseUp => "mouseUp",
            DragEvent::BoundsFail => "boundsFail",
        }
    }
}

impl fmt::Display for DragEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which slot of an event a handler occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerPrefix {
    AdapterBefore,
    Before,
    AdapterOn,
    On,
}

impl HandlerPrefix {
    /// Order in which the slots of one event fire.
    pub const DISPATCH_ORDER: [HandlerPrefix; 4] = [
        HandlerPrefix::AdapterBefore,
        HandlerPrefix::Before,
        HandlerPrefix::AdapterOn,
        HandlerPrefix::On,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// True for the slots reserved to framework bindings.
    #[inline]
    pub fn is_adapter(self) -> bool {
        matches!(self, HandlerPrefix::AdapterBefore | HandlerPrefix::AdapterOn)
    }
}

/// A registered callback.
///
/// Receives the native event (absent for programmatic updates and detach),
/// the state snapshot, and the configuration handle of the owning draggable.
pub type DragHandler = Rc<dyn Fn(Option<&PointerSample>, &DragState, &DraggableHandle)>;

/// Box a closure as a [`DragHandler`].
pub fn drag_handler(
    f: impl Fn(Option<&PointerSample>, &DragState, &DraggableHandle) + 'static,
) -> DragHandler {
    Rc::new(f)
}

const EVENT_COUNT: usize = DragEvent::ALL.len();
const PREFIX_COUNT: usize = HandlerPrefix::DISPATCH_ORDER.len();

type HandlerRow = [Option<DragHandler>; PREFIX_COUNT];

/// Fixed table of optional handlers, one slot per event and prefix.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    slots: [HandlerRow; EVENT_COUNT],
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, event: DragEvent, prefix: HandlerPrefix, handler: DragHandler) -> Self {
        self.set(event, prefix, handler);
        self
    }

    /// Builder shortcut for the `on` slot.
    pub fn on(
        self,
        event: DragEvent,
        f: impl Fn(Option<&PointerSample>, &DragState, &DraggableHandle) + 'static,
    ) -> Self {
        self.with(event, HandlerPrefix::On, drag_handler(f))
    }

    /// Builder shortcut for the `before` slot.
    pub fn before(
        self,
        event: DragEvent,
        f: impl Fn(Option<&PointerSample>, &DragState, &DraggableHandle) + 'static,
    ) -> Self {
        self.with(event, HandlerPrefix::Before, drag_handler(f))
    }

    pub fn set(&mut self, event: DragEvent, prefix: HandlerPrefix, handler: DragHandler) {
        self.slots[event.index()][prefix.index()] = Some(handler);
    }

    pub fn clear(&mut self, event: DragEvent, prefix: HandlerPrefix) {
        self.slots[event.index()][prefix.index()] = None;
    }

    pub fn get(&self, event: DragEvent, prefix: HandlerPrefix) -> Option<&DragHandler> {
        self.slots[event.index()][prefix.index()].as_ref()
    }

    pub fn is_set(&self, event: DragEvent, prefix: HandlerPrefix) -> bool {
        self.get(event, prefix).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty every slot.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Take handlers from `incoming`.
    ///
    /// Consumer slots (`before`/`on`) set in `incoming` replace the current
    /// ones; with `clear_unset`, consumer slots unset in `incoming` are
    /// cleared. Adapter slots are only replaced when `incoming` sets them.
    pub fn merge(&mut self, incoming: HandlerRegistry, clear_unset: bool) {
        for event in DragEvent::ALL {
            for prefix in HandlerPrefix::DISPATCH_ORDER {
                let slot = &mut self.slots[event.index()][prefix.index()];
                match incoming.slots[event.index()][prefix.index()].clone() {
                    Some(handler) => *slot = Some(handler),
                    None if clear_unset && !prefix.is_adapter() => *slot = None,
                    None => {}
                }
            }
        }
    }

    /// The handlers of `event` in dispatch order, cloned so the registry
    /// can change while they run.
    pub fn row(&self, event: DragEvent) -> HandlerRow {
        self.slots[event.index()].clone()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for event in DragEvent::ALL {
            for prefix in HandlerPrefix::DISPATCH_ORDER {
                if self.is_set(event, prefix) {
                    list.entry(&(event, prefix));
                }
            }
        }
        list.finish()
    }
}

/// Invoke every handler in `row`, in prefix order, synchronously.
pub fn dispatch(
    event: DragEvent,
    row: &HandlerRow,
    native: Option<&PointerSample>,
    state: &DragState,
    handle: &DraggableHandle,
) {
    dispatch_while(event, row, native, state, handle, || true);
}

/// Like [`dispatch`], but `proceed` is checked before each handler and the
/// remaining slots are skipped once it returns false.
pub fn dispatch_while(
    event: DragEvent,
    row: &HandlerRow,
    native: Option<&PointerSample>,
    state: &DragState,
    handle: &DraggableHandle,
    proceed: impl Fn() -> bool,
) {
    profile_scope!("dispatch", SLOW_DISPATCH_MS);
    tracing::trace!(%event, "Dispatching");
    for handler in row.iter().flatten() {
        if !proceed() {
            tracing::trace!(%event, "Dispatch stopped early");
            break;
        }
        handler(native, state, handle);
    }
}
