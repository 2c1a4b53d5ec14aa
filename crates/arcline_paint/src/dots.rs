//! Dotted stroke sampling
//!
//! A dashed curve is drawn as a run of filled circles marched along the
//! screen points at a fixed spacing. The leftover distance at the end of one
//! pair carries into the next, and the last point always gets a cap dot.
//!
//! Dots are addressed by index along each pair and placed in `f64`, so the
//! march stays exact on pairs far longer than the viewport. Marching stops
//! once `MAX_DOTS` have been emitted.

use crate::primitives::Circle;
use arcline_core::{Point, Rect};

/// Upper bound on dots emitted for one stroke, cap dot excluded
pub const MAX_DOTS: usize = 100_000;

/// Dot centers marched along consecutive point pairs
///
/// Zero-length pairs contribute nothing and pass the carried distance
/// through. A non-finite or non-positive `spacing` yields only the cap dot.
pub fn sample_dots(points: &[Point], radius: f32, spacing: f32) -> Vec<Circle> {
    march(points, radius, spacing, None)
}

/// Like `sample_dots`, but only emits dots whose circle can touch `clip`
///
/// The carried distance still accounts for the clipped-out stretches, so
/// the visible dots sit exactly where the unclipped march would put them.
pub fn sample_dots_in(points: &[Point], radius: f32, spacing: f32, clip: Rect) -> Vec<Circle> {
    march(points, radius, spacing, Some(clip))
}

fn march(points: &[Point], radius: f32, spacing: f32, clip: Option<Rect>) -> Vec<Circle> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };

    let mut dots = Vec::new();
    if spacing.is_finite() && spacing > 0.0 {
        let spacing = f64::from(spacing);
        let margin = f64::from(radius.max(0.0));
        let mut carry = 0.0_f64;

        'pairs: for (index, pair) in points.windows(2).enumerate() {
            let (x0, y0) = (f64::from(pair[0].x), f64::from(pair[0].y));
            let (dx, dy) = (f64::from(pair[1].x) - x0, f64::from(pair[1].y) - y0);
            let total = dx.hypot(dy);
            if total <= 0.0 || !total.is_finite() {
                tracing::trace!(pair = index, "skipping zero-length pair");
                continue;
            }

            // Dots on this pair sit at carry + i * spacing for i in 0..count
            let count = ((total - carry) / spacing).ceil().max(0.0);
            let (lo, hi) = match clip {
                None => (0.0, count - 1.0),
                Some(rect) => match clip_span(x0, y0, dx, dy, rect, margin) {
                    Some((t0, t1)) => (
                        ((t0 * total - carry) / spacing).ceil().max(0.0),
                        ((t1 * total - carry) / spacing).floor().min(count - 1.0),
                    ),
                    None => (1.0, 0.0),
                },
            };

            if lo <= hi {
                for i in lo as u64..=hi as u64 {
                    if dots.len() >= MAX_DOTS {
                        tracing::warn!(max = MAX_DOTS, "dot limit reached, truncating stroke");
                        break 'pairs;
                    }
                    let t = (carry + i as f64 * spacing) / total;
                    let center = Point::new((x0 + dx * t) as f32, (y0 + dy * t) as f32);
                    dots.push(Circle::new(center, radius));
                }
            }

            carry += count * spacing - total;
        }
    }

    dots.push(Circle::new(last, radius));
    dots
}

/// Parameter range of the pair that lies inside `rect` grown by `margin`
/// (Liang-Barsky)
fn clip_span(x0: f64, y0: f64, dx: f64, dy: f64, rect: Rect, margin: f64) -> Option<(f64, f64)> {
    let min_x = f64::from(rect.x()) - margin;
    let min_y = f64::from(rect.y()) - margin;
    let max_x = f64::from(rect.x()) + f64::from(rect.width()) + margin;
    let max_y = f64::from(rect.y()) + f64::from(rect.height()) + margin;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}
