//! Draw Context - Recording Rendering API
//!
//! The `DrawContext` trait is the narrow drawing surface the curve pipeline
//! paints into: stroke a path, stamp a circle, scope a blend mode and open an
//! isolated layer. Any 2D backend that can stroke and erase can replay it.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_layer(LayerConfig::new().size(ctx.viewport_size()));
//!     ctx.stroke_path(&path, &Stroke::round(4.0), Color::BLUE.into());
//!
//!     // Carve the inner part back out of the layer
//!     ctx.push_blend_mode(BlendMode::DestinationOut);
//!     ctx.stroke_path(&path, &Stroke::round(2.0), Color::BLACK.into());
//!     ctx.pop_blend_mode();
//!
//!     ctx.pop_layer();
//! }
//! ```

use smallvec::SmallVec;

use crate::layer::{BlendMode, Brush, Point, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How an open stroke ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// How consecutive stroke segments meet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

/// Stroke style
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Stroke {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Round caps and joins, the only stroke the curve pipeline issues
    pub fn round(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, end: Point },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

impl PathCommand {
    /// Where the pen rests after this command (None for Close)
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        }
    }
}

/// A vector path
///
/// Paths are values: building methods consume and return `self`, and nothing
/// in the pipeline mutates a path after it has been handed out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self {
            commands: SmallVec::new(),
        }
    }

    pub fn move_to(self, x: f32, y: f32) -> Self {
        self.with_command(PathCommand::MoveTo(Point::new(x, y)))
    }

    pub fn line_to(self, x: f32, y: f32) -> Self {
        self.with_command(PathCommand::LineTo(Point::new(x, y)))
    }

    pub fn quad_to(self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.with_command(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            end: Point::new(x, y),
        })
    }

    pub fn cubic_to(self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.with_command(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        })
    }

    pub fn close(self) -> Self {
        self.with_command(PathCommand::Close)
    }

    /// Append a raw command
    pub fn with_command(mut self, command: PathCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Straight segment from `from` to `to`
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(PathCommand::end_point)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for an offscreen layer
///
/// Blend modes pushed inside a layer only act on what was drawn into that
/// layer. The finished layer is composited normally onto its parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerConfig {
    /// Layer size (None = inherit from parent)
    pub size: Option<Size>,
}

impl LayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Drawing context the curve pipeline paints into
pub trait DrawContext {
    /// Push a blend mode for subsequent draws
    fn push_blend_mode(&mut self, mode: BlendMode);

    /// Restore the previous blend mode
    fn pop_blend_mode(&mut self);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush);

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    /// Begin an isolated offscreen layer
    fn push_layer(&mut self, config: LayerConfig);

    /// End the current layer and composite it onto its parent
    fn pop_layer(&mut self);

    fn viewport_size(&self) -> Size;

    fn current_blend_mode(&self) -> BlendMode;

    /// Number of open offscreen layers
    fn layer_depth(&self) -> usize;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushBlendMode(BlendMode),
    PopBlendMode,
    StrokePath {
        path: Path,
        stroke: Stroke,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
    PushLayer(LayerConfig),
    PopLayer,
}

/// A draw context that records commands for later replay
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    blend_modes: Vec<BlendMode>,
    layer_depth: usize,
    viewport: Size,
}

impl RecordingContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the context empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop recorded commands and reset the state stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.blend_modes.clear();
        self.layer_depth = 0;
    }
}

impl DrawContext for RecordingContext {
    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::PushBlendMode(mode));
        self.blend_modes.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.commands.push(DrawCommand::PopBlendMode);
        if self.blend_modes.pop().is_none() {
            tracing::warn!("RecordingContext: pop_blend_mode without matching push");
        }
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            brush,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn push_layer(&mut self, config: LayerConfig) {
        self.commands.push(DrawCommand::PushLayer(config));
        self.layer_depth += 1;
    }

    fn pop_layer(&mut self) {
        self.commands.push(DrawCommand::PopLayer);
        if self.layer_depth > 0 {
            self.layer_depth -= 1;
        } else {
            tracing::warn!("RecordingContext: pop_layer without matching push");
        }
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.blend_modes.last().copied().unwrap_or_default()
    }

    fn layer_depth(&self) -> usize {
        self.layer_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Color;

    #[test]
    fn test_recording_context() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.push_layer(LayerConfig::new());
        ctx.fill_circle(Point::new(10.0, 30.0), 4.0, Color::BLUE.into());
        ctx.stroke_path(
            &Path::line(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            &Stroke::round(2.0),
            Color::RED.into(),
        );
        ctx.pop_layer();

        assert_eq!(ctx.commands().len(), 4);
        assert_eq!(ctx.layer_depth(), 0);

        let taken = ctx.take_commands();
        assert_eq!(taken.first(), Some(&DrawCommand::PushLayer(LayerConfig::new())));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_path_builder() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .quad_to(100.0, 100.0, 0.0, 100.0)
            .close();

        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.start_point(), Some(Point::new(0.0, 0.0)));
        assert_eq!(path.end_point(), Some(Point::new(0.0, 100.0)));
    }

    #[test]
    fn test_empty_path() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.start_point(), None);
        assert_eq!(path.end_point(), None);
    }

    #[test]
    fn test_blend_mode_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
        ctx.push_blend_mode(BlendMode::DestinationOut);
        assert_eq!(ctx.current_blend_mode(), BlendMode::DestinationOut);
        ctx.pop_blend_mode();
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);

        // Popping past the root only warns
        ctx.pop_blend_mode();
        ctx.pop_layer();
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
        assert_eq!(ctx.layer_depth(), 0);
    }

    #[test]
    fn test_stroke_configuration() {
        let stroke = Stroke::round(2.0);
        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.cap, LineCap::Round);
        assert_eq!(stroke.join, LineJoin::Round);

        let plain = Stroke::new(1.0);
        assert_eq!((plain.cap, plain.join), (LineCap::Butt, LineJoin::Miter));
    }

    #[test]
    fn test_layer_config_defaults() {
        assert_eq!(LayerConfig::new().size, None);
        let config = LayerConfig::new().size(Size::new(10.0, 10.0));
        assert_eq!(config.size, Some(Size::new(10.0, 10.0)));
    }
}
