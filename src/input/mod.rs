//! Pointer input: capture, button decoding and movement math.
//!
//! ## Architecture
//!
//! A drag is tracked by an explicit phase machine (`CapturePhase`) instead of
//! scattered flags. While a drag is active the tracker holds exactly one
//! window subscription; dropping or cancelling it removes the listeners.
//!
//! ## Modules
//!
//! - `buttons` - 16-bit button mask decoding
//! - `coords` - Pixel/logical unit conversion
//! - `movement` - Position, start and delta bookkeeping
//! - `state` - Capture phase machine
//! - `subscription` - Window event sources and cancellation handles
//! - `tracker` - Window-level pointer capture

pub mod buttons;
pub mod coords;
pub mod movement;
pub mod state;
pub mod subscription;
pub mod tracker;

pub use buttons::ButtonState;
pub use coords::UnitConverter;
pub use movement::Movement;
pub use state::{CapturePhase, SessionId};
pub use subscription::{
    ContextMenuRequest, LocalPointerSource, PointerSource, Subscription, WindowEvent,
    WindowListener, window_listener,
};
pub use tracker::{EndReason, PointerCaptureTracker, TrackerCallbacks};
