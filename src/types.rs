//! Core value types shared by the tracker, the movement model and the draggable.
//!
//! Everything here is a small `Copy` value so snapshots can be handed to
//! callbacks without borrowing any internal state.

use crate::error::{DragError, DragResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Coordinates
// ============================================================================

/// A pair of coordinates, used for positions, deltas and per-axis scales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    /// The origin / zero delta.
    pub const ZERO: XY = XY { x: 0.0, y: 0.0 };

    /// Identity scale.
    pub const ONE: XY = XY { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Componentwise multiplication.
    #[inline]
    pub fn scale(self, by: XY) -> XY {
        XY::new(self.x * by.x, self.y * by.y)
    }

    /// Componentwise division.
    #[inline]
    pub fn unscale(self, by: XY) -> XY {
        XY::new(self.x / by.x, self.y / by.y)
    }

    /// Check both components against another value within `epsilon`.
    #[inline]
    pub fn approx_eq(self, other: XY, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl From<(f64, f64)> for XY {
    fn from((x, y): (f64, f64)) -> Self {
        XY::new(x, y)
    }
}

impl std::ops::Add for XY {
    type Output = XY;
    #[inline]
    fn add(self, other: XY) -> XY {
        XY::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for XY {
    #[inline]
    fn add_assign(&mut self, other: XY) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for XY {
    type Output = XY;
    #[inline]
    fn sub(self, other: XY) -> XY {
        XY::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Neg for XY {
    type Output = XY;
    #[inline]
    fn neg(self) -> XY {
        XY::new(-self.x, -self.y)
    }
}

// ============================================================================
// Units
// ============================================================================

/// Which coordinate space a caller-supplied value is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Raw device pixels, before the unit scale is applied.
    Pixel,
    /// Caller-defined logical units (`pixels * unit_scale`).
    #[default]
    Value,
}

// ============================================================================
// Limits
// ============================================================================

/// Axis of a coordinate pair, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Optional bounding box for the position.
///
/// An axis set to `None` is unbounded. `unit` says whether the ranges apply
/// to the logical position or to the pixel position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
    pub unit: UnitType,
}

impl Limits {
    /// Limits in logical units on both axes.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            unit: UnitType::Value,
        }
    }

    /// Limits on the x axis only.
    pub fn x_only(min: f64, max: f64) -> Self {
        Self {
            x: Some((min, max)),
            ..Default::default()
        }
    }

    /// Limits on the y axis only.
    pub fn y_only(min: f64, max: f64) -> Self {
        Self {
            y: Some((min, max)),
            ..Default::default()
        }
    }

    pub fn in_unit(mut self, unit: UnitType) -> Self {
        self.unit = unit;
        self
    }

    fn range(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Strict check: every bound finite and `min <= max`.
    pub fn validate(&self) -> DragResult<()> {
        for axis in [Axis::X, Axis::Y] {
            if let Some((min, max)) = self.range(axis) {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(DragError::InvalidLimits { axis, min, max });
                }
            }
        }
        Ok(())
    }

    /// Caller-facing normalization: inverted bounds are swapped and an axis
    /// with a non-finite bound is dropped. Each correction is logged.
    pub fn normalized(self) -> Self {
        let fix = |axis: Axis, range: Option<(f64, f64)>| -> Option<(f64, f64)> {
            let (min, max) = range?;
            if !min.is_finite() || !max.is_finite() {
                tracing::warn!(%axis, min, max, "Ignoring non-finite limit");
                return None;
            }
            if min > max {
                tracing::warn!(%axis, min, max, "Swapping inverted limit bounds");
                return Some((max, min));
            }
            Some((min, max))
        };
        Self {
            x: fix(Axis::X, self.x),
            y: fix(Axis::Y, self.y),
            unit: self.unit,
        }
    }

    /// Clamp a point into the box. Returns the clamped point and the axes
    /// that had to move.
    pub fn clamp(&self, point: XY) -> (XY, AxisHits) {
        let clamp_axis = |v: f64, range: Option<(f64, f64)>| match range {
            Some((min, max)) => v.clamp(min, max),
            None => v,
        };
        let clamped = XY::new(clamp_axis(point.x, self.x), clamp_axis(point.y, self.y));
        let hits = AxisHits {
            x: clamped.x != point.x,
            y: clamped.y != point.y,
        };
        (clamped, hits)
    }
}

/// Axes a [`Limits::clamp`] had to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisHits {
    pub x: bool,
    pub y: bool,
}

impl AxisHits {
    #[inline]
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

// ============================================================================
// Input events
// ============================================================================

/// Host-assigned identifier for the element an event was dispatched to.
pub type EventTargetId = u64;

/// The minimal mouse-event-like structure the core consumes.
///
/// Touch input is expected to be normalized into this shape before it
/// reaches the tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Client (viewport) coordinates in pixels.
    pub client: XY,
    /// Pressed-button bitmask, as in `MouseEvent.buttons`.
    pub buttons: u16,
    pub target: Option<EventTargetId>,
}

impl PointerSample {
    pub fn new(client_x: f64, client_y: f64, buttons: u16) -> Self {
        Self {
            client: XY::new(client_x, client_y),
            buttons,
            target: None,
        }
    }

    pub fn with_target(mut self, target: EventTargetId) -> Self {
        self.target = Some(target);
        self
    }

    /// True if any bit of `mask` is pressed in this sample.
    #[inline]
    pub fn has_any(&self, mask: u16) -> bool {
        self.buttons & mask != 0
    }
}
