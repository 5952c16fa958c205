// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Density-independent units and measurement constraints.

/// Conversion factors between density-independent units and device pixels.
///
/// Everything crossing the public API is density-independent; layout itself runs in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent point.
    pub density: f32,
    /// User font scale applied on top of `density` for scalable (SP) sizes.
    pub font_scale: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            font_scale: 1.0,
        }
    }
}

impl DisplayMetrics {
    /// Creates display metrics with the given density and font scale.
    pub fn new(density: f32, font_scale: f32) -> Self {
        Self {
            density,
            font_scale,
        }
    }

    /// Density-independent points to pixels.
    pub fn dip_to_px(self, value: f32) -> f32 {
        value * self.density
    }

    /// Scalable points to pixels.
    pub fn sp_to_px(self, value: f32) -> f32 {
        value * self.density * self.font_scale
    }

    /// Pixels back to density-independent points.
    pub fn px_to_dip(self, value: f32) -> f32 {
        value / self.density
    }

    /// Converts a font-related size, honouring a fragment's font scaling preferences.
    ///
    /// `max_multiplier` caps the user font scale when it is at least 1.
    pub fn font_to_px(self, value: f32, allow_scaling: bool, max_multiplier: Option<f32>) -> f32 {
        if !allow_scaling {
            return self.dip_to_px(value);
        }
        let scale = match max_multiplier {
            Some(max) if max >= 1.0 => self.font_scale.min(max),
            _ => self.font_scale,
        };
        value * self.density * scale
    }
}

/// How a width or height constraint is to be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// No constraint; the value is ignored.
    #[default]
    Undefined,
    /// The result must be exactly the given value.
    Exactly,
    /// The result may not exceed the given value.
    AtMost,
}

/// A width and height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayMetrics;

    #[test]
    fn font_scale_is_capped_by_multiplier() {
        let metrics = DisplayMetrics::new(2.0, 1.5);
        assert_eq!(metrics.font_to_px(10.0, true, None), 30.0);
        assert_eq!(metrics.font_to_px(10.0, true, Some(1.2)), 24.0);
        // Multipliers below 1 are ignored.
        assert_eq!(metrics.font_to_px(10.0, true, Some(0.5)), 30.0);
        assert_eq!(metrics.font_to_px(10.0, false, None), 20.0);
        assert_eq!(metrics.px_to_dip(30.0), 15.0);
    }
}
