//! Movement model - pure kinematics of a drag.
//!
//! A [`Movement`] is an immutable snapshot. Every operation returns a new
//! snapshot; nothing is mutated in place.
//!
//! Pixel quantities are the source of truth. Logical quantities are always
//! `pixels * unit_scale`, recomputed whenever a snapshot is built.
//!
//! ```text
//! new(start)        -> position = start, delta = 0, last_client = None
//! advance(client)   -> delta = client - last_client (0 if None), last_client = client
//! reset_position(p) -> position = start = p, delta = 0, last_client = None
//! ```

use crate::error::{DragError, DragResult};
use crate::input::coords::UnitConverter;
use crate::types::{Limits, UnitType, XY};
use serde::{Deserialize, Serialize};

/// Kinematics of a drag at one instant, in pixels and in logical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Current logical position
    pub position: XY,
    /// Logical position when the drag (or the last reset) started
    pub start_position: XY,
    /// Logical change since the previous sample
    pub delta: XY,
    pub pixel_position: XY,
    pub pixel_start: XY,
    pub pixel_delta: XY,
    /// Pixel to logical multiplier
    pub unit_scale: XY,
    /// Last raw client coordinates, `None` until the first sample of a drag
    pub last_client_position: Option<XY>,
}

impl Default for Movement {
    fn default() -> Self {
        Self::project(XY::ZERO, XY::ZERO, XY::ZERO, XY::ONE, None)
    }
}

impl Movement {
    /// Establish a snapshot at `start`, interpreted in `unit`.
    pub fn new(start: XY, unit: UnitType, unit_scale: XY) -> DragResult<Self> {
        let converter = UnitConverter::new(unit_scale)?;
        if !start.is_finite() {
            return Err(DragError::NonFiniteCoordinate {
                x: start.x,
                y: start.y,
            });
        }
        let start_px = converter.pixels_from(start, unit);
        Ok(Self::project(start_px, start_px, XY::ZERO, unit_scale, None))
    }

    /// Build a snapshot from pixel quantities, deriving the logical ones.
    fn project(
        pixel_position: XY,
        pixel_start: XY,
        pixel_delta: XY,
        unit_scale: XY,
        last_client_position: Option<XY>,
    ) -> Self {
        Self {
            position: pixel_position.scale(unit_scale),
            start_position: pixel_start.scale(unit_scale),
            delta: pixel_delta.scale(unit_scale),
            pixel_position,
            pixel_start,
            pixel_delta,
            unit_scale,
            last_client_position,
        }
    }

    #[inline]
    fn converter(&self) -> UnitConverter {
        UnitConverter::unchecked(self.unit_scale)
    }

    /// Apply a new client sample.
    ///
    /// The first sample after construction or a reset produces a zero delta
    /// and only records the client position.
    pub fn advance(&self, client: XY) -> Movement {
        let pixel_delta = match self.last_client_position {
            Some(last) => client - last,
            None => XY::ZERO,
        };
        Self::project(
            self.pixel_position + pixel_delta,
            self.pixel_start,
            pixel_delta,
            self.unit_scale,
            Some(client),
        )
    }

    /// Override position and start, zero the delta and forget the client
    /// position so the next sample starts fresh.
    pub fn reset_position(&self, xy: XY, unit: UnitType) -> Movement {
        let px = self.converter().pixels_from(xy, unit);
        self.reset_to_pixels(px)
    }

    fn reset_to_pixels(&self, px: XY) -> Movement {
        Self::project(px, px, XY::ZERO, self.unit_scale, None)
    }

    /// Re-project with a different scale. Pixel quantities are kept.
    pub fn with_unit_scale(&self, unit_scale: XY) -> DragResult<Movement> {
        UnitConverter::new(unit_scale)?;
        Ok(Self::project(
            self.pixel_position,
            self.pixel_start,
            self.pixel_delta,
            unit_scale,
            self.last_client_position,
        ))
    }

    /// Clamp the position into `limits`.
    ///
    /// Returns the clamped snapshot and whether clamping happened. The delta
    /// is corrected to the movement actually applied, so
    /// `position == start_position + sum(delta)` still holds.
    pub fn clamp_to(&self, limits: &Limits) -> (Movement, bool) {
        let (clamped, hits) = match limits.unit {
            UnitType::Pixel => limits.clamp(self.pixel_position),
            UnitType::Value => limits.clamp(self.position),
        };
        if !hits.any() {
            return (*self, false);
        }
        // Only the clamped axes are converted back; the other axis keeps its
        // pixel value bit for bit.
        let to_px = |v: f64, scale: f64| match limits.unit {
            UnitType::Pixel => v,
            UnitType::Value => v / scale,
        };
        let mut target_px = self.pixel_position;
        if hits.x {
            target_px.x = to_px(clamped.x, self.unit_scale.x);
        }
        if hits.y {
            target_px.y = to_px(clamped.y, self.unit_scale.y);
        }
        let correction = target_px - self.pixel_position;
        let clamped = Self::project(
            target_px,
            self.pixel_start,
            self.pixel_delta + correction,
            self.unit_scale,
            self.last_client_position,
        );
        (clamped, true)
    }

    /// [`advance`](Self::advance) followed by clamping, if limits are set.
    pub fn advance_within(&self, client: XY, limits: Option<&Limits>) -> (Movement, bool) {
        let next = self.advance(client);
        match limits {
            Some(limits) => next.clamp_to(limits),
            None => (next, false),
        }
    }

    /// [`reset_position`](Self::reset_position) followed by clamping. The
    /// start follows the clamped position and the delta stays zero.
    pub fn reset_within(&self, xy: XY, unit: UnitType, limits: Option<&Limits>) -> (Movement, bool) {
        let reset = self.reset_position(xy, unit);
        let Some(limits) = limits else {
            return (reset, false);
        };
        match reset.clamp_to(limits) {
            (clamped, true) => (reset.reset_to_pixels(clamped.pixel_position), true),
            (_, false) => (reset, false),
        }
    }
}
