//! Coordinate conversion between device pixels and logical units.
//!
//! Centralizes the pixel/unit formulas so the movement model and the limit
//! checks use the same projection.

use crate::error::{DragError, DragResult};
use crate::types::{UnitType, XY};

/// Projects pixels to logical units with a per-axis scale.
///
/// The scale is validated on construction, so division never sees zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConverter {
    scale: XY,
}

impl UnitConverter {
    /// Create a converter. Fails for non-finite or non-positive scales.
    pub fn new(scale: XY) -> DragResult<Self> {
        if !Self::is_valid_scale(scale) {
            return Err(DragError::InvalidScale {
                x: scale.x,
                y: scale.y,
            });
        }
        Ok(Self { scale })
    }

    /// For scales that were already validated (e.g. carried by a `Movement`).
    #[inline]
    pub(crate) fn unchecked(scale: XY) -> Self {
        debug_assert!(Self::is_valid_scale(scale));
        Self { scale }
    }

    #[inline]
    pub fn is_valid_scale(scale: XY) -> bool {
        scale.is_finite() && scale.x > 0.0 && scale.y > 0.0
    }

    #[inline]
    pub fn scale(&self) -> XY {
        self.scale
    }

    /// Convert a pixel position or delta to logical units
    #[inline]
    pub fn to_units(&self, pixels: XY) -> XY {
        pixels.scale(self.scale)
    }

    /// Convert a logical position or delta to pixels
    #[inline]
    pub fn to_pixels(&self, units: XY) -> XY {
        units.unscale(self.scale)
    }

    /// Interpret `value` in `unit` and return it in pixels
    #[inline]
    pub fn pixels_from(&self, value: XY, unit: UnitType) -> XY {
        match unit {
            UnitType::Pixel => value,
            UnitType::Value => self.to_pixels(value),
        }
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self { scale: XY::ONE }
    }
}
