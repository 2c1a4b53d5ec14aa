//! Curve segment records

use arcline_paint::{Color, SegmentStyle};

use crate::error::StyleError;
use crate::geo::{GeoBounds, LatLng};

/// One styled curve between two geographic endpoints
///
/// Endpoints are fixed at construction. Projected screen points are never
/// stored here; each render pass keeps its own.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSegment {
    from: LatLng,
    to: LatLng,
    style: SegmentStyle,
}

impl CurveSegment {
    pub fn new(from: LatLng, to: LatLng) -> Self {
        Self::with_style(from, to, SegmentStyle::default())
    }

    pub fn with_style(from: LatLng, to: LatLng, style: SegmentStyle) -> Self {
        Self { from, to, style }
    }

    pub fn from(&self) -> LatLng {
        self.from
    }

    pub fn to(&self) -> LatLng {
        self.to
    }

    pub fn style(&self) -> &SegmentStyle {
        &self.style
    }

    pub fn endpoints(&self) -> [LatLng; 2] {
        [self.from, self.to]
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::from_points(self.from, self.to)
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.style.base_stroke_width = width;
        self
    }

    pub fn with_animated_stroke_width(mut self, width: f32) -> Self {
        self.style.animated_stroke_width = width;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.style.base_color = color;
        self
    }

    pub fn with_animated_color(mut self, color: Color) -> Self {
        self.style.animated_color = color;
        self
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.style.border_width = width;
        self.style.border_color = Some(color);
        self
    }

    pub fn with_gradient(mut self, colors: Vec<Color>) -> Self {
        self.style.gradient_colors = Some(colors);
        self
    }

    pub fn with_color_stops(mut self, stops: Vec<f32>) -> Self {
        self.style.color_stops = Some(stops);
        self
    }

    pub fn dashed(mut self, dashed: bool) -> Self {
        self.style.dashed = dashed;
        self
    }

    /// Reject styles that cannot be drawn as described
    pub fn validate(&self) -> Result<(), StyleError> {
        for point in self.endpoints() {
            if !point.is_finite() {
                return Err(StyleError::NonFiniteCoordinate(point));
            }
        }

        let style = &self.style;
        for (field, value) in [
            ("base stroke width", style.base_stroke_width),
            ("animated stroke width", style.animated_stroke_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StyleError::InvalidWidth { field, value });
            }
        }
        if !(style.border_width.is_finite() && style.border_width >= 0.0) {
            return Err(StyleError::NegativeBorder(style.border_width));
        }
        if matches!(&style.gradient_colors, Some(colors) if colors.is_empty()) {
            return Err(StyleError::EmptyPalette);
        }
        Ok(())
    }
}
