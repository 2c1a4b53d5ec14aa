//! Geometric primitives specific to arcline_paint

use arcline_core::Point;

/// A circle, used as the stamp for dotted strokes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }
}
