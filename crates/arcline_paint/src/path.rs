//! Curve construction
//!
//! Core path types are re-exported from arcline_core. `PathBuilder` provides a
//! fluent API for general paths; `build_curve` derives the single quadratic
//! bow that connects two projected endpoints.

// Re-export core types
pub use arcline_core::{Path, PathCommand, Point};

use smallvec::SmallVec;

/// Builder for constructing paths with fluent API
///
/// PathBuilder maintains cursor state so callers can ask where the pen is.
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.path = self.path.move_to(p.x, p.y);
        self.current = p;
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.path = self.path.line_to(p.x, p.y);
        self.current = p;
        self
    }

    pub fn quad_to(mut self, control: Point, end: Point) -> Self {
        self.path = self.path.quad_to(control.x, control.y, end.x, end.y);
        self.current = end;
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, end: Point) -> Self {
        self.path = self
            .path
            .cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y);
        self.current = end;
        self
    }

    pub fn close(mut self) -> Self {
        self.path = self.path.close();
        self
    }

    pub fn build(self) -> Path {
        self.path
    }

    /// Get the current cursor position
    pub fn current_position(&self) -> Point {
        self.current
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Control point of the quadratic bow between `p0` and `p1`
///
/// The chord midpoint is offset by the chord vector rotated 90°, scaled by
/// one half, so the bow height is proportional to the chord length and always
/// bends to the same side for a given ordering of the endpoints.
pub fn curve_control_point(p0: Point, p1: Point) -> Point {
    let d = p0 - p1;
    Point::new((p0.x + p1.x - d.y) / 2.0, (p0.y + p1.y + d.x) / 2.0)
}

/// Build the single quadratic curve from `p0` to `p1`
///
/// Coincident endpoints produce a zero-length path rather than an error.
pub fn build_curve(p0: Point, p1: Point) -> Path {
    PathBuilder::new()
        .move_to(p0)
        .quad_to(curve_control_point(p0, p1), p1)
        .build()
}

/// Screen points for an ordered run of projected vertices
///
/// The first vertex is appended once and every later vertex twice (closing
/// the previous edge and opening the next), so two endpoints give
/// `[p0, p1, p1]`. Only the first two entries shape a two-point curve.
pub fn screen_points(vertices: impl IntoIterator<Item = Point>) -> SmallVec<[Point; 3]> {
    let mut points = SmallVec::new();
    for (i, vertex) in vertices.into_iter().enumerate() {
        points.push(vertex);
        if i > 0 {
            points.push(vertex);
        }
    }
    points
}
