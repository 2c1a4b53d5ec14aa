//! Arcline Core
//!
//! Foundational types shared by the Arcline crates:
//!
//! - **Geometry**: points, vectors, sizes and rects in screen space
//! - **Visual Types**: colors, linear gradients, brushes and blend modes
//! - **Paths**: immutable vector paths built from move/line/curve commands
//! - **Draw Context**: the narrow drawing API the curve pipeline records into
//! - **Repaint Signal**: the notification that drives a repaint
//!
//! # Example
//!
//! ```rust
//! use arcline_core::{Color, DrawContext, Path, Point, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! let path = Path::line(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
//! ctx.stroke_path(&path, &Stroke::round(3.0), Color::BLUE.into());
//!
//! assert_eq!(ctx.commands().len(), 1);
//! ```

pub mod draw;
pub mod layer;
pub mod signal;

pub use draw::{
    DrawCommand, DrawContext, LayerConfig, LineCap, LineJoin, Path, PathCommand, RecordingContext,
    Stroke,
};
pub use layer::{BlendMode, Brush, Color, Gradient, GradientStop, Point, Rect, Size, Vec2};
pub use signal::{RepaintSignal, WakeCallback};
