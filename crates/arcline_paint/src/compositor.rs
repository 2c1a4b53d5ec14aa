//! Layer composition for one curve
//!
//! Everything for a segment is drawn inside its own isolated layer so the
//! subtractive mask only erases what was drawn for that segment:
//!
//! 1. border (base width plus border width)
//! 2. mask under `BlendMode::DestinationOut` at the fill footprint
//! 3. fill (gradient or base colour)
//! 4. animated overlay, smooth curves only

use crate::dots::{sample_dots, sample_dots_in};
use crate::measure::truncate;
use crate::path::build_curve;
use crate::style::SegmentStyle;
use arcline_core::{BlendMode, Brush, DrawContext, LayerConfig, Path, Point, Rect, Stroke};

/// Dot spacing as a multiple of the base stroke width
pub const DEFAULT_DOT_SPACING_FACTOR: f32 = 1.5;

/// Knobs for `composite`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeOptions {
    pub dot_spacing_factor: f32,
    /// Draw the animated stroke over the full curve when no progress is given
    pub overlay_when_static: bool,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            dot_spacing_factor: DEFAULT_DOT_SPACING_FACTOR,
            overlay_when_static: true,
        }
    }
}

/// Brushes and widths resolved from a `SegmentStyle` for one pass
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentPaints {
    pub border: Option<Brush>,
    pub mask: Option<Brush>,
    pub fill: Brush,
    pub overlay: Brush,
    pub base_width: f32,
    pub border_width: f32,
    pub overlay_width: f32,
}

impl SegmentPaints {
    /// Resolve paints for a curve running from `start` to `end`
    pub fn resolve(style: &SegmentStyle, start: Point, end: Point) -> Self {
        Self {
            border: style.border_paint(),
            mask: style.mask_paint(),
            fill: style.fill_brush(start, end),
            overlay: style.animated_color.into(),
            base_width: style.base_stroke_width,
            border_width: style.border_stroke_width(),
            overlay_width: style.animated_stroke_width,
        }
    }

    /// Border and mask brushes, only when both exist
    fn outline(&self) -> Option<(&Brush, &Brush)> {
        self.border.as_ref().zip(self.mask.as_ref())
    }
}

fn open_layer(ctx: &mut dyn DrawContext) {
    let size = ctx.viewport_size();
    ctx.push_layer(LayerConfig::new().size(size));
}

/// The viewport as a clip rect, unless it has no area
fn viewport_clip(ctx: &dyn DrawContext) -> Option<Rect> {
    let size = ctx.viewport_size();
    (size.width > 0.0 && size.height > 0.0).then(|| Rect::from(size))
}

fn stamp(
    ctx: &mut dyn DrawContext,
    points: &[Point],
    radius: f32,
    spacing: f32,
    clip: Option<Rect>,
    brush: &Brush,
) {
    let dots = match clip {
        Some(clip) => sample_dots_in(points, radius, spacing, clip),
        None => sample_dots(points, radius, spacing),
    };
    for dot in dots {
        ctx.fill_circle(dot.center, dot.radius, brush.clone());
    }
}

/// Dotted rendering of `points`
///
/// Dots that cannot touch the viewport are skipped; an empty viewport draws
/// the full march.
pub fn composite_dotted(
    ctx: &mut dyn DrawContext,
    points: &[Point],
    paints: &SegmentPaints,
    spacing: f32,
) {
    let inner = paints.base_width / 2.0;
    let clip = viewport_clip(ctx);

    open_layer(ctx);
    if let Some((border, mask)) = paints.outline() {
        stamp(ctx, points, paints.border_width / 2.0, spacing, clip, border);
        ctx.push_blend_mode(BlendMode::DestinationOut);
        stamp(ctx, points, inner, spacing, clip, mask);
        ctx.pop_blend_mode();
    }
    stamp(ctx, points, inner, spacing, clip, &paints.fill);
    ctx.pop_layer();
}

/// Smooth rendering of `path`, with the animated overlay on top
///
/// With `progress` the overlay covers that fraction of the arc length. Without
/// it the overlay covers the whole curve when `overlay_when_static` is set.
pub fn composite_smooth(
    ctx: &mut dyn DrawContext,
    path: &Path,
    paints: &SegmentPaints,
    progress: Option<f32>,
    overlay_when_static: bool,
) {
    open_layer(ctx);
    if let Some((border, mask)) = paints.outline() {
        ctx.stroke_path(path, &Stroke::round(paints.border_width), border.clone());
        ctx.push_blend_mode(BlendMode::DestinationOut);
        ctx.stroke_path(path, &Stroke::round(paints.base_width), mask.clone());
        ctx.pop_blend_mode();
    }
    ctx.stroke_path(path, &Stroke::round(paints.base_width), paints.fill.clone());

    let overlay = match progress {
        Some(progress) => Some(truncate(path, progress)),
        None if overlay_when_static => Some(path.clone()),
        None => None,
    };
    if let Some(overlay) = overlay.filter(|p| !p.is_empty()) {
        ctx.stroke_path(
            &overlay,
            &Stroke::round(paints.overlay_width),
            paints.overlay.clone(),
        );
    }
    ctx.pop_layer();
}

/// Composite one segment from its projected screen points
///
/// Returns `false` without drawing anything when fewer than two points are
/// usable.
pub fn composite(
    ctx: &mut dyn DrawContext,
    points: &[Point],
    style: &SegmentStyle,
    progress: Option<f32>,
    options: &CompositeOptions,
) -> bool {
    let (p0, p1) = match points {
        [p0, p1, ..] => (*p0, *p1),
        _ => {
            tracing::debug!(points = points.len(), "not enough screen points, skipping");
            return false;
        }
    };

    let paints = SegmentPaints::resolve(style, p0, p1);
    if style.dashed {
        let spacing = style.base_stroke_width * options.dot_spacing_factor;
        composite_dotted(ctx, points, &paints, spacing);
    } else {
        let path = build_curve(p0, p1);
        composite_smooth(ctx, &path, &paints, progress, options.overlay_when_static);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcline_core::{Color, DrawCommand, RecordingContext, Size};

    fn bordered() -> SegmentStyle {
        SegmentStyle {
            base_stroke_width: 4.0,
            animated_stroke_width: 2.0,
            base_color: Color::BLUE,
            animated_color: Color::WHITE,
            border_width: 2.0,
            border_color: Some(Color::RED),
            ..Default::default()
        }
    }

    fn record(
        points: &[Point],
        style: &SegmentStyle,
        progress: Option<f32>,
        options: &CompositeOptions,
    ) -> Vec<DrawCommand> {
        let mut ctx = RecordingContext::new(Size::new(200.0, 100.0));
        composite(&mut ctx, points, style, progress, options);
        assert_eq!(ctx.layer_depth(), 0);
        ctx.take_commands()
    }

    fn brushes_of(commands: &[DrawCommand]) -> Vec<(Brush, f32)> {
        commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokePath { stroke, brush, .. } => Some((brush.clone(), stroke.width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_smooth_layer_order() {
        let points = [Point::new(0.0, 50.0), Point::new(100.0, 50.0)];
        let commands = record(&points, &bordered(), None, &CompositeOptions::default());

        assert_eq!(
            commands.first(),
            Some(&DrawCommand::PushLayer(
                LayerConfig::new().size(Size::new(200.0, 100.0))
            ))
        );
        assert_eq!(commands.last(), Some(&DrawCommand::PopLayer));
        assert_eq!(commands[2], DrawCommand::PushBlendMode(BlendMode::DestinationOut));
        assert_eq!(commands[4], DrawCommand::PopBlendMode);

        assert_eq!(
            brushes_of(&commands),
            vec![
                (Brush::Solid(Color::RED), 6.0),
                (Brush::Solid(Color::BLACK), 4.0),
                (Brush::Solid(Color::BLUE), 4.0),
                (Brush::Solid(Color::WHITE), 2.0),
            ]
        );
    }

    #[test]
    fn test_strokes_use_round_caps() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let commands = record(&points, &bordered(), None, &CompositeOptions::default());

        for cmd in &commands {
            if let DrawCommand::StrokePath { stroke, .. } = cmd {
                assert_eq!(*stroke, Stroke::round(stroke.width));
            }
        }
    }

    #[test]
    fn test_overlay_follows_progress() {
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let style = SegmentStyle::new();
        let options = CompositeOptions::default();
        let full = build_curve(points[0], points[1]);

        let overlay_path = |commands: &[DrawCommand]| {
            commands
                .iter()
                .filter_map(|cmd| match cmd {
                    DrawCommand::StrokePath { path, .. } => Some(path.clone()),
                    _ => None,
                })
                .nth(1)
        };

        let half = record(&points, &style, Some(0.5), &options);
        assert_eq!(overlay_path(&half), Some(truncate(&full, 0.5)));

        let none = record(&points, &style, Some(0.0), &options);
        assert_eq!(overlay_path(&none), None);

        let stat = record(&points, &style, None, &options);
        assert_eq!(overlay_path(&stat), Some(full));

        let static_off = CompositeOptions {
            overlay_when_static: false,
            ..options
        };
        let bare = record(&points, &style, None, &static_off);
        assert_eq!(brushes_of(&bare).len(), 1);
    }

    #[test]
    fn test_dotted_border_mask_fill_order() {
        let style = SegmentStyle {
            dashed: true,
            base_stroke_width: 2.0,
            ..bordered()
        };
        let points = [
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 0.0),
        ];
        let commands = record(&points, &style, Some(0.5), &CompositeOptions::default());

        // spacing 3 over 6 px: dots at 0 and 3, then the cap at 6
        let dots = |brush: Color, radius: f32| {
            [0.0, 3.0, 6.0].map(|x| DrawCommand::FillCircle {
                center: Point::new(x, 0.0),
                radius,
                brush: Brush::Solid(brush),
            })
        };

        let mut expected = vec![DrawCommand::PushLayer(
            LayerConfig::new().size(Size::new(200.0, 100.0)),
        )];
        expected.extend(dots(Color::RED, 2.0));
        expected.push(DrawCommand::PushBlendMode(BlendMode::DestinationOut));
        expected.extend(dots(Color::BLACK, 1.0));
        expected.push(DrawCommand::PopBlendMode);
        expected.extend(dots(Color::BLUE, 1.0));
        expected.push(DrawCommand::PopLayer);

        assert_eq!(commands, expected);
    }

    #[test]
    fn test_dotted_long_segment_is_clipped_to_viewport() {
        let style = SegmentStyle {
            dashed: true,
            base_stroke_width: 2.0,
            ..bordered()
        };
        let end = Point::new(1.0e9, 50.0);
        let commands = record(
            &[Point::new(0.0, 50.0), end],
            &style,
            None,
            &CompositeOptions::default(),
        );

        let circles: Vec<Point> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();

        // spacing 3 across a 200 px viewport, three passes
        assert!(circles.len() < 3 * 72, "{} dots", circles.len());
        assert_eq!(circles.iter().filter(|c| **c == end).count(), 3);
        assert!(circles.iter().all(|c| c.x <= 203.0 || *c == end));
    }

    #[test]
    fn test_no_border_skips_mask() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let commands = record(&points, &SegmentStyle::new(), None, &CompositeOptions::default());

        assert!(!commands
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::PushBlendMode(_))));
    }

    #[test]
    fn test_too_few_points_draws_nothing() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        let options = CompositeOptions::default();

        assert!(!composite(&mut ctx, &[], &SegmentStyle::new(), None, &options));
        assert!(!composite(
            &mut ctx,
            &[Point::new(1.0, 1.0)],
            &SegmentStyle::new(),
            None,
            &options
        ));
        assert!(ctx.commands().is_empty());
    }
}
