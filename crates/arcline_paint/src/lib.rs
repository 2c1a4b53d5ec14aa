//! Arcline Paint
//!
//! The curve pipeline: everything between two projected screen points and a
//! composited layer of draw commands.
//!
//! # Features
//!
//! - Quadratic bow construction between two points
//! - Arc-length measurement and truncation for progressive reveal
//! - Dotted strokes with spacing carried across point pairs
//! - Linear gradients along the curve with evenly spaced or explicit stops
//! - Border, subtractive mask and fill composited inside an isolated layer
//!
//! # Example
//!
//! ```rust
//! use arcline_paint::{CompositeOptions, PaintContext, Point, SegmentStyle};
//!
//! let mut ctx = PaintContext::new(800.0, 600.0);
//! let style = SegmentStyle::default();
//! let points = [Point::new(10.0, 10.0), Point::new(300.0, 120.0)];
//!
//! ctx.draw_segment(&points, &style, Some(0.5), &CompositeOptions::default());
//! let commands = ctx.take_commands();
//! assert!(!commands.is_empty());
//! ```

pub mod compositor;
pub mod context;
pub mod dots;
pub mod gradient;
pub mod measure;
pub mod path;
pub mod primitives;
pub mod style;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from arcline_core
// ─────────────────────────────────────────────────────────────────────────────

pub use arcline_core::{
    // Blending
    BlendMode,
    // Brushes and fills
    Brush,
    // Colors
    Color,
    // Draw context trait
    DrawCommand,
    DrawContext,
    // Gradients
    Gradient,
    GradientStop,
    // Layers
    LayerConfig,
    // Strokes
    LineCap,
    LineJoin,
    // Paths
    Path,
    PathCommand,
    // Geometry
    Point,
    Rect,
    Size,
    Stroke,
};

// ─────────────────────────────────────────────────────────────────────────────
// arcline_paint specific exports
// ─────────────────────────────────────────────────────────────────────────────

pub use compositor::{
    composite, composite_dotted, composite_smooth, CompositeOptions, SegmentPaints,
    DEFAULT_DOT_SPACING_FACTOR,
};
pub use context::PaintContext;
pub use dots::{sample_dots, sample_dots_in, MAX_DOTS};
pub use gradient::{gradient_along, resolve_stops};
pub use measure::{measure, truncate, PathMetrics, PathSegment, SubpathMetric};
pub use path::{build_curve, curve_control_point, screen_points, PathBuilder};
pub use primitives::Circle;
pub use style::SegmentStyle;
