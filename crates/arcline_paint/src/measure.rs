//! Arc-length measurement and truncation
//!
//! `measure` walks a path once and returns a plain `PathMetrics` value: one
//! entry per subpath (each `MoveTo` opens a new one), each holding its
//! segments and their lengths. `truncate` builds a fresh metrics value per
//! call and consumes it while extracting the prefix, so a measurement is
//! never walked twice.
//!
//! Lengths are integrated from the curve speed with adaptive Simpson
//! quadrature in f64; the prefix of a partially covered segment is found by
//! bisection on the curve parameter and split with lyon's `before_split`.

use arcline_core::{Path, PathCommand, Point};
use lyon::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use smallvec::SmallVec;

/// Absolute error budget for one integration, in pixels
const LENGTH_TOLERANCE: f64 = 1e-7;

/// Recursion limit for adaptive Simpson
const MAX_DEPTH: u32 = 18;

/// Fixed subdivisions before adaptive refinement starts
const BASE_INTERVALS: usize = 8;

/// Bisection steps when inverting length to curve parameter
const BISECTION_STEPS: usize = 48;

type GeomPoint = lyon::geom::Point<f64>;

fn to_geom(p: Point) -> GeomPoint {
    GeomPoint::new(p.x as f64, p.y as f64)
}

fn from_geom(p: GeomPoint) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

// ─────────────────────────────────────────────────────────────────────────────
// Segments
// ─────────────────────────────────────────────────────────────────────────────

/// A single drawable piece of a subpath
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    Line(LineSegment<f64>),
    Quad(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

impl PathSegment {
    fn line(from: Point, to: Point) -> Self {
        PathSegment::Line(LineSegment {
            from: to_geom(from),
            to: to_geom(to),
        })
    }

    fn from_command(from: Point, command: &PathCommand) -> Option<Self> {
        match *command {
            PathCommand::LineTo(to) => Some(Self::line(from, to)),
            PathCommand::QuadTo { control, end } => {
                Some(PathSegment::Quad(QuadraticBezierSegment {
                    from: to_geom(from),
                    ctrl: to_geom(control),
                    to: to_geom(end),
                }))
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => Some(PathSegment::Cubic(CubicBezierSegment {
                from: to_geom(from),
                ctrl1: to_geom(control1),
                ctrl2: to_geom(control2),
                to: to_geom(end),
            })),
            PathCommand::MoveTo(_) | PathCommand::Close => None,
        }
    }

    /// Magnitude of the derivative at `t`
    fn speed(&self, t: f64) -> f64 {
        match self {
            PathSegment::Line(line) => line.to_vector().length(),
            PathSegment::Quad(quad) => quad.derivative(t).length(),
            PathSegment::Cubic(cubic) => cubic.derivative(t).length(),
        }
    }

    /// Arc length of the parameter range `0..t`
    fn length_to(&self, t: f64) -> f64 {
        match self {
            PathSegment::Line(line) => line.to_vector().length() * t,
            _ => integrate(|u| self.speed(u), 0.0, t),
        }
    }

    /// Total arc length of the segment
    pub fn length(&self) -> f64 {
        self.length_to(1.0)
    }

    /// Curve parameter at which the arc length from the start equals `distance`
    fn t_at_length(&self, distance: f64, total: f64) -> f64 {
        if distance <= 0.0 || total <= 0.0 {
            return 0.0;
        }
        if distance >= total {
            return 1.0;
        }
        if let PathSegment::Line(_) = self {
            return distance / total;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..BISECTION_STEPS {
            let mid = 0.5 * (lo + hi);
            if self.length_to(mid) < distance {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// The part of this segment covering the parameter range `0..t`
    fn before(&self, t: f64) -> Self {
        match self {
            PathSegment::Line(line) => PathSegment::Line(LineSegment {
                from: line.from,
                to: line.from.lerp(line.to, t),
            }),
            PathSegment::Quad(quad) => PathSegment::Quad(quad.before_split(t)),
            PathSegment::Cubic(cubic) => PathSegment::Cubic(cubic.before_split(t)),
        }
    }

    fn sample(&self, t: f64) -> Point {
        from_geom(match self {
            PathSegment::Line(line) => line.sample(t),
            PathSegment::Quad(quad) => quad.sample(t),
            PathSegment::Cubic(cubic) => cubic.sample(t),
        })
    }

    /// Drawing command continuing from the segment's start point
    fn to_command(&self) -> PathCommand {
        match self {
            PathSegment::Line(line) => PathCommand::LineTo(from_geom(line.to)),
            PathSegment::Quad(quad) => PathCommand::QuadTo {
                control: from_geom(quad.ctrl),
                end: from_geom(quad.to),
            },
            PathSegment::Cubic(cubic) => PathCommand::CubicTo {
                control1: from_geom(cubic.ctrl1),
                control2: from_geom(cubic.ctrl2),
                end: from_geom(cubic.to),
            },
        }
    }
}

/// Integrate `f` over `a..b` with adaptive Simpson quadrature
fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> f64 {
    if b <= a {
        return 0.0;
    }
    let step = (b - a) / BASE_INTERVALS as f64;
    let eps = LENGTH_TOLERANCE / BASE_INTERVALS as f64;
    (0..BASE_INTERVALS)
        .map(|i| {
            let lo = a + step * i as f64;
            let hi = if i + 1 == BASE_INTERVALS { b } else { lo + step };
            let (f_lo, f_mid, f_hi) = (f(lo), f(0.5 * (lo + hi)), f(hi));
            let whole = (hi - lo) / 6.0 * (f_lo + 4.0 * f_mid + f_hi);
            simpson(&f, lo, hi, [f_lo, f_mid, f_hi], whole, eps, MAX_DEPTH)
        })
        .sum()
}

fn simpson<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    [fa, fm, fb]: [f64; 3],
    whole: f64,
    eps: f64,
    depth: u32,
) -> f64 {
    let m = 0.5 * (a + b);
    let f_left = f(0.5 * (a + m));
    let f_right = f(0.5 * (m + b));
    let left = (m - a) / 6.0 * (fa + 4.0 * f_left + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * f_right + fb);
    let delta = left + right - whole;

    if depth == 0 || delta.abs() <= 15.0 * eps {
        left + right + delta / 15.0
    } else {
        simpson(f, a, m, [fa, f_left, fm], left, eps / 2.0, depth - 1)
            + simpson(f, m, b, [fm, f_right, fb], right, eps / 2.0, depth - 1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metrics
// ─────────────────────────────────────────────────────────────────────────────

/// A measured segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentMetric {
    pub segment: PathSegment,
    pub length: f64,
}

/// A measured subpath
#[derive(Clone, Debug, PartialEq)]
pub struct SubpathMetric {
    /// Position of this subpath within the path
    pub index: usize,
    /// Where the subpath starts
    pub start: Point,
    /// Segments in drawing order (a closing line is the last entry when `closed`)
    pub segments: SmallVec<[SegmentMetric; 2]>,
    /// Whether the subpath ends with `Close`
    pub closed: bool,
    length: f64,
}

impl SubpathMetric {
    fn new(index: usize, start: Point) -> Self {
        Self {
            index,
            start,
            segments: SmallVec::new(),
            closed: false,
            length: 0.0,
        }
    }

    fn push(&mut self, segment: PathSegment) {
        let length = segment.length();
        self.length += length;
        self.segments.push(SegmentMetric { segment, length });
    }

    /// Arc length of the whole subpath
    pub fn length(&self) -> f32 {
        self.length as f32
    }

    /// Append the entire subpath to `out`
    fn append_whole(self, mut out: Path) -> Path {
        out = out.with_command(PathCommand::MoveTo(self.start));
        let drawn = if self.closed {
            self.segments.len().saturating_sub(1)
        } else {
            self.segments.len()
        };
        for metric in &self.segments[..drawn] {
            out = out.with_command(metric.segment.to_command());
        }
        if self.closed {
            out = out.close();
        }
        out
    }

    /// Append the prefix of the subpath covering `distance`
    fn append_prefix(self, mut out: Path, distance: f64) -> Path {
        out = out.with_command(PathCommand::MoveTo(self.start));
        let mut remaining = distance;
        for metric in &self.segments {
            if metric.length <= remaining {
                out = out.with_command(metric.segment.to_command());
                remaining -= metric.length;
            } else {
                let t = metric.segment.t_at_length(remaining, metric.length);
                out = out.with_command(metric.segment.before(t).to_command());
                break;
            }
        }
        out
    }
}

/// Per-subpath lengths of a path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathMetrics {
    subpaths: Vec<SubpathMetric>,
}

impl PathMetrics {
    /// The measured subpaths, in path order
    pub fn subpaths(&self) -> &[SubpathMetric] {
        &self.subpaths
    }

    /// `(subpath index, length)` for every subpath
    pub fn lengths(&self) -> Vec<(usize, f32)> {
        self.subpaths
            .iter()
            .map(|sub| (sub.index, sub.length()))
            .collect()
    }

    /// Sum of all subpath lengths
    pub fn total_length(&self) -> f32 {
        self.total() as f32
    }

    fn total(&self) -> f64 {
        self.subpaths.iter().map(|sub| sub.length).sum()
    }

    /// Point at arc length `distance` from the start of the path
    ///
    /// Distances past the end resolve to the end of the last drawn segment.
    /// Returns `None` for a path with no segments.
    pub fn position_at(&self, distance: f32) -> Option<Point> {
        let mut remaining = (distance as f64).max(0.0);
        let mut last = None;
        for metric in self.subpaths.iter().flat_map(|sub| sub.segments.iter()) {
            if remaining <= metric.length {
                let t = metric.segment.t_at_length(remaining, metric.length);
                return Some(metric.segment.sample(t));
            }
            remaining -= metric.length;
            last = Some(metric.segment.sample(1.0));
        }
        last
    }

    /// Consume the metrics, returning the path prefix of arc length `target`
    ///
    /// Whole subpaths are appended while they fit; the first one that does
    /// not fit contributes only its prefix, and extraction stops there.
    pub fn extract(self, target: f32) -> Path {
        let target = target as f64;
        let mut out = Path::new();
        let mut current = 0.0;
        for sub in self.subpaths {
            if current + sub.length <= target {
                current += sub.length;
                out = sub.append_whole(out);
            } else {
                let remaining = target - current;
                tracing::trace!(
                    subpath = sub.index,
                    remaining,
                    "truncating inside subpath"
                );
                out = sub.append_prefix(out, remaining);
                break;
            }
        }
        out
    }
}

/// Measure every subpath of `path`
///
/// Drawing commands before the first `MoveTo` start at the origin. A subpath
/// made of a lone `MoveTo` is kept with zero length.
pub fn measure(path: &Path) -> PathMetrics {
    let mut subpaths = Vec::new();
    let mut open: Option<SubpathMetric> = None;
    let mut current = Point::ZERO;

    for command in path.commands() {
        match command {
            PathCommand::MoveTo(p) => {
                subpaths.extend(open.take());
                open = Some(SubpathMetric::new(subpaths.len(), *p));
                current = *p;
            }
            PathCommand::Close => {
                if let Some(mut sub) = open.take() {
                    sub.push(PathSegment::line(current, sub.start));
                    sub.closed = true;
                    current = sub.start;
                    subpaths.push(sub);
                }
            }
            drawing => {
                let sub = open.get_or_insert_with(|| SubpathMetric::new(subpaths.len(), current));
                if let Some(segment) = PathSegment::from_command(current, drawing) {
                    sub.push(segment);
                }
                if let Some(end) = drawing.end_point() {
                    current = end;
                }
            }
        }
    }
    subpaths.extend(open);

    PathMetrics { subpaths }
}

/// The prefix of `path` covering `progress` of its total arc length
///
/// Progress is clamped to `0..=1` (NaN counts as 0). Zero yields an empty
/// path and one yields the input unchanged.
pub fn truncate(path: &Path, progress: f32) -> Path {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    if progress <= 0.0 {
        return Path::new();
    }
    if progress >= 1.0 {
        return path.clone();
    }

    let metrics = measure(path);
    let target = metrics.total_length() * progress;
    metrics.extract(target)
}
