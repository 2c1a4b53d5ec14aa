//! Paint context - curve-oriented drawing API implementing DrawContext
//!
//! PaintContext records into a RecordingContext and adds a few helpers for
//! curves and dots on top of the DrawContext primitives.

use arcline_core::{
    BlendMode, Brush, DrawCommand, DrawContext, LayerConfig, Path, Point, RecordingContext, Size,
    Stroke,
};

use crate::compositor::{composite, CompositeOptions};
use crate::path::build_curve;
use crate::primitives::Circle;
use crate::style::SegmentStyle;

/// The paint context used to record curve layers
pub struct PaintContext {
    recording: RecordingContext,
}

impl PaintContext {
    /// Create a new paint context with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_size(Size::new(width, height))
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            recording: RecordingContext::new(size),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        self.recording.commands()
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.recording.take_commands()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Curve convenience API
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stroke the quadratic bow from `p0` to `p1`
    pub fn stroke_curve(&mut self, p0: Point, p1: Point, stroke: &Stroke, brush: impl Into<Brush>) {
        self.stroke_path(&build_curve(p0, p1), stroke, brush.into());
    }

    /// Fill a single dot
    pub fn fill_dot(&mut self, dot: Circle, brush: impl Into<Brush>) {
        self.fill_circle(dot.center, dot.radius, brush.into());
    }

    /// Composite a styled segment from its screen points
    pub fn draw_segment(
        &mut self,
        points: &[Point],
        style: &SegmentStyle,
        progress: Option<f32>,
        options: &CompositeOptions,
    ) -> bool {
        composite(self, points, style, progress, options)
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DrawContext Implementation - delegates to RecordingContext
// ═══════════════════════════════════════════════════════════════════════════════

impl DrawContext for PaintContext {
    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.recording.push_blend_mode(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.recording.pop_blend_mode();
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.recording.stroke_path(path, stroke, brush);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.recording.fill_circle(center, radius, brush);
    }

    fn push_layer(&mut self, config: LayerConfig) {
        self.recording.push_layer(config);
    }

    fn pop_layer(&mut self) {
        self.recording.pop_layer();
    }

    fn viewport_size(&self) -> Size {
        self.recording.viewport_size()
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.recording.current_blend_mode()
    }

    fn layer_depth(&self) -> usize {
        self.recording.layer_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcline_core::Color;

    #[test]
    fn test_paint_context_basic() {
        let mut ctx = PaintContext::new(800.0, 600.0);
        ctx.stroke_curve(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &Stroke::round(2.0),
            Color::BLUE,
        );
        ctx.fill_dot(Circle::new(Point::new(5.0, 5.0), 1.0), Color::RED);

        assert_eq!(ctx.commands().len(), 2);
        assert_eq!(ctx.viewport_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_draw_segment_balances_layers() {
        let mut ctx = PaintContext::default();
        let style = SegmentStyle {
            border_width: 1.0,
            border_color: Some(Color::BLACK),
            ..Default::default()
        };

        let drawn = ctx.draw_segment(
            &[Point::new(0.0, 0.0), Point::new(30.0, 40.0)],
            &style,
            Some(0.5),
            &CompositeOptions::default(),
        );

        assert!(drawn);
        assert_eq!(ctx.layer_depth(), 0);
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
        assert_eq!(ctx.take_commands().len(), 8);
        assert!(ctx.commands().is_empty());
    }
}
