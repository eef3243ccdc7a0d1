//! Configuration for trackers and draggables.
//!
//! Both structs deserialize with defaults for every missing field, so a
//! host can pass `{}` or a partial JSON object. Caller-supplied values go
//! through [`DraggableOptions::normalized`] before use: bad values are
//! corrected and logged, never rejected.

use crate::constants::{
    DEFAULT_ACCEPTED_BUTTONS, DEFAULT_MOUSE_UP_ON_PHANTOM_MOVE, DEFAULT_PIXEL_SCALE,
    DEFAULT_SUPPRESS_CONTEXT_MENU,
};
use crate::error::DragResult;
use crate::input::coords::UnitConverter;
use crate::types::{Limits, UnitType, XY};
use serde::{Deserialize, Serialize};

// ============================================================================
// Tracker
// ============================================================================

/// Behavior of a [`PointerCaptureTracker`](crate::input::PointerCaptureTracker).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Only pointer-downs with one of these bits pressed start a drag
    pub accepted_buttons: u16,
    /// Prevent the context menu while a drag is active
    pub suppress_context_menu: bool,
    /// Treat a move with no accepted button pressed as a release
    pub mouse_up_on_phantom_move: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            accepted_buttons: DEFAULT_ACCEPTED_BUTTONS,
            suppress_context_menu: DEFAULT_SUPPRESS_CONTEXT_MENU,
            mouse_up_on_phantom_move: DEFAULT_MOUSE_UP_ON_PHANTOM_MOVE,
        }
    }
}

impl TrackerConfig {
    pub fn with_buttons(mut self, accepted_buttons: u16) -> Self {
        self.accepted_buttons = accepted_buttons;
        self
    }

    pub fn with_context_menu_suppressed(mut self, suppress: bool) -> Self {
        self.suppress_context_menu = suppress;
        self
    }

    pub fn with_phantom_move_release(mut self, enabled: bool) -> Self {
        self.mouse_up_on_phantom_move = enabled;
        self
    }
}

// ============================================================================
// Draggable
// ============================================================================

/// Initial settings for a [`Draggable`](crate::draggable::Draggable).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraggableOptions {
    pub enabled: bool,
    pub buttons: u16,
    /// Pixel to logical unit multiplier
    pub pixel_scale: XY,
    /// Initial position
    pub start_xy: XY,
    /// Unit `start_xy` is expressed in
    pub start_unit: UnitType,
    pub limits: Option<Limits>,
    pub suppress_context_menu: bool,
    pub mouse_up_on_phantom_move: bool,
}

impl Default for DraggableOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            buttons: DEFAULT_ACCEPTED_BUTTONS,
            pixel_scale: DEFAULT_PIXEL_SCALE,
            start_xy: XY::ZERO,
            start_unit: UnitType::Value,
            limits: None,
            suppress_context_menu: DEFAULT_SUPPRESS_CONTEXT_MENU,
            mouse_up_on_phantom_move: DEFAULT_MOUSE_UP_ON_PHANTOM_MOVE,
        }
    }
}

impl DraggableOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DragResult<Self> {
        let options: DraggableOptions = serde_json::from_str(json)?;
        Ok(options.normalized())
    }

    /// Correct invalid values, logging each correction.
    pub fn normalized(mut self) -> Self {
        if !UnitConverter::is_valid_scale(self.pixel_scale) {
            tracing::warn!(
                x = self.pixel_scale.x,
                y = self.pixel_scale.y,
                "Invalid pixel scale, using default"
            );
            self.pixel_scale = DEFAULT_PIXEL_SCALE;
        }
        if !self.start_xy.is_finite() {
            tracing::warn!(
                x = self.start_xy.x,
                y = self.start_xy.y,
                "Non-finite start position, using origin"
            );
            self.start_xy = XY::ZERO;
        }
        self.limits = self.limits.map(Limits::normalized);
        self
    }

    /// The tracker half of these options.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            accepted_buttons: self.buttons,
            suppress_context_menu: self.suppress_context_menu,
            mouse_up_on_phantom_move: self.mouse_up_on_phantom_move,
        }
    }
}
