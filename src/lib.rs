//! Pointer-drag tracking.
//!
//! A drag starts on an element's pointer-down and is then followed at the
//! window level until release, so it keeps working when the pointer leaves
//! the element. Each step produces a [`DragState`] snapshot and raises the
//! `start`/`move`/`mouseUp`/`end` lifecycle plus the `update`/`change`/
//! `boundsFail` state events.
//!
//! ## Modules
//!
//! - `input` - Window capture, button decoding and movement math
//! - `draggable` - Movement model plus handler dispatch
//! - `handlers` - Handler table and dispatch order
//! - `config` - Tracker and draggable options
//! - `perf` - Hot path timing (`profiling` feature)
//! - `web` - Browser window source (`web` feature)
//!
//! ```ignore
//! let source = Rc::new(LocalPointerSource::new());
//! let draggable = Draggable::new(source.clone());
//! draggable.set_handlers(
//!     HandlerRegistry::new().on(DragEvent::Move, |_, state, _| {
//!         println!("at {:?}", state.position());
//!     }),
//!     false,
//! );
//! draggable.drag_start_handler(&PointerSample::new(0.0, 0.0, button::PRIMARY));
//! source.pointer_move(PointerSample::new(10.0, 0.0, button::PRIMARY));
//! ```

pub mod config;
pub mod constants;
pub mod draggable;
pub mod error;
pub mod handlers;
pub mod input;
pub mod perf;
pub mod types;
#[cfg(feature = "web")]
pub mod web;

pub use config::{DraggableOptions, TrackerConfig};
pub use constants::button;
pub use draggable::{DragState, Draggable, DraggableHandle};
pub use error::{DragError, DragResult};
pub use handlers::{DragEvent, DragHandler, HandlerPrefix, HandlerRegistry, drag_handler};
pub use input::{
    ButtonState, CapturePhase, EndReason, LocalPointerSource, Movement, PointerCaptureTracker,
    PointerSource, Subscription, TrackerCallbacks, WindowEvent,
};
pub use types::{EventTargetId, Limits, PointerSample, UnitType, XY};
