//! Gradient fills along a curve
//!
//! Gradient types are re-exported from arcline_core. The functions here
//! resolve stop offsets for a colour palette and lay the gradient along the
//! chord of a curve.

pub use arcline_core::{Gradient, GradientStop};

use crate::{Color, Point};

/// Stop offsets for `colors`
///
/// Explicit stops win when they are present and pair one-to-one with the
/// palette. Otherwise stop `i` sits at `i / n`, so the last colour starts at
/// `(n - 1) / n` and pads to the end.
pub fn resolve_stops(colors: &[Color], explicit: Option<&[f32]>) -> Vec<f32> {
    if let Some(stops) = explicit {
        if stops.len() == colors.len() {
            return stops.to_vec();
        }
        tracing::debug!(
            stops = stops.len(),
            colors = colors.len(),
            "color stop count mismatch, using even stops"
        );
    }

    let n = colors.len() as f32;
    (0..colors.len()).map(|i| i as f32 / n).collect()
}

/// Linear gradient from `start` to `end` over `colors`
///
/// Stops pair with colours by position, so a repeated colour gets its own
/// stop.
pub fn gradient_along(
    start: Point,
    end: Point,
    colors: &[Color],
    explicit: Option<&[f32]>,
) -> Gradient {
    let stops = resolve_stops(colors, explicit)
        .into_iter()
        .zip(colors)
        .map(|(offset, &color)| GradientStop::new(offset, color))
        .collect();
    Gradient::linear_with_stops(start, end, stops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_stops_stop_short_of_one() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE];
        assert_eq!(resolve_stops(&colors, None), vec![0.0, 1.0 / 3.0, 2.0 / 3.0]);
        assert_eq!(resolve_stops(&[Color::RED], None), vec![0.0]);
        assert!(resolve_stops(&[], None).is_empty());
    }

    #[test]
    fn test_explicit_stops_pass_through() {
        let colors = [Color::RED, Color::BLUE];
        assert_eq!(
            resolve_stops(&colors, Some(&[0.2, 0.9][..])),
            vec![0.2, 0.9]
        );
    }

    #[test]
    fn test_mismatched_stops_are_ignored() {
        let colors = [Color::RED, Color::GREEN];
        assert_eq!(resolve_stops(&colors, Some(&[0.1, 0.5, 0.9][..])), vec![0.0, 0.5]);
    }

    #[test]
    fn test_repeated_colors_get_distinct_stops() {
        let colors = [Color::RED, Color::RED, Color::BLUE, Color::RED];
        let gradient = gradient_along(Point::ZERO, Point::new(10.0, 0.0), &colors, None);
        let offsets: Vec<f32> = gradient.stops().iter().map(|s| s.offset).collect();

        assert_eq!(offsets, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(gradient.first_color(), Color::RED);
        match gradient {
            Gradient::Linear { start, end, .. } => {
                assert_eq!(start, Point::ZERO);
                assert_eq!(end, Point::new(10.0, 0.0));
            }
        }
    }
}
