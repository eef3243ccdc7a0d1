//! Library-wide constants.
//!
//! Centralizes defaults so the config layer, the tracker and the
//! draggable agree on them.

use crate::types::XY;

// ============================================================================
// Buttons
// ============================================================================

/// Number of buttons representable in a `MouseEvent.buttons` bitmask
pub const BUTTON_COUNT: usize = 16;

/// Button bits used for defaults. Combine with `|`, e.g.
/// `button::PRIMARY | button::SECONDARY`.
pub mod button {
    /// No button
    pub const NONE: u16 = 0;
    /// Every button
    pub const ANY: u16 = u16::MAX;
    /// Usually the left button
    pub const PRIMARY: u16 = 1;
    /// Usually the right button
    pub const SECONDARY: u16 = 1 << 1;
    /// Usually the wheel button
    pub const MIDDLE: u16 = 1 << 2;
}

// ============================================================================
// Defaults
// ============================================================================

/// Buttons that start a drag unless configured otherwise
pub const DEFAULT_ACCEPTED_BUTTONS: u16 = button::PRIMARY;

/// One device pixel per logical unit
pub const DEFAULT_PIXEL_SCALE: XY = XY::ONE;

/// A move with no accepted button pressed ends the drag
pub const DEFAULT_MOUSE_UP_ON_PHANTOM_MOVE: bool = true;

/// The context menu is left alone during drags
pub const DEFAULT_SUPPRESS_CONTEXT_MENU: bool = false;

// ============================================================================
// Profiling
// ============================================================================

/// Handler dispatch slower than this is reported (milliseconds)
pub const SLOW_DISPATCH_MS: f64 = 4.0;
