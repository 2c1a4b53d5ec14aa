//! Per-segment paint style

use crate::gradient::gradient_along;
use arcline_core::{Brush, Color, Point};

/// Visual style of one curve
///
/// Plain data; nothing here is touched by a render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentStyle {
    /// Width of the static stroke and of dotted fills
    pub base_stroke_width: f32,
    /// Width of the animated overlay stroke
    pub animated_stroke_width: f32,
    pub base_color: Color,
    pub animated_color: Color,
    /// Extra width around the base stroke; 0 disables the border
    pub border_width: f32,
    pub border_color: Option<Color>,
    /// Palette for a linear gradient fill, overrides `base_color`
    pub gradient_colors: Option<Vec<Color>>,
    /// Explicit stop offsets, used only when they pair with `gradient_colors`
    pub color_stops: Option<Vec<f32>>,
    pub dashed: bool,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            base_stroke_width: 3.0,
            animated_stroke_width: 3.0,
            base_color: Color::BLUE,
            animated_color: Color::WHITE,
            border_width: 0.0,
            border_color: None,
            gradient_colors: None,
            color_stops: None,
            dashed: false,
        }
    }
}

impl SegmentStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Border stroke width (base plus border)
    pub fn border_stroke_width(&self) -> f32 {
        self.base_stroke_width + self.border_width
    }

    /// Border brush, when a visible border is configured
    pub fn border_paint(&self) -> Option<Brush> {
        match self.border_color {
            Some(color) if self.border_width > 0.0 => Some(color.into()),
            _ => None,
        }
    }

    /// Brush for the subtractive pass that carves the fill footprint out of
    /// the border
    ///
    /// Only its coverage matters, so it is opaque black whenever a border is
    /// drawn.
    pub fn mask_paint(&self) -> Option<Brush> {
        self.border_paint().map(|_| Color::BLACK.into())
    }

    /// The gradient palette, if it has at least one colour
    pub fn gradient_palette(&self) -> Option<&[Color]> {
        self.gradient_colors
            .as_deref()
            .filter(|colors| !colors.is_empty())
    }

    /// Brush for the fill stroke between `start` and `end`
    ///
    /// A non-empty gradient palette takes precedence; otherwise the flat base
    /// colour is used.
    pub fn fill_brush(&self, start: Point, end: Point) -> Brush {
        if let Some(colors) = self.gradient_palette() {
            return gradient_along(start, end, colors, self.color_stops.as_deref()).into();
        }
        self.base_color.into()
    }
}
