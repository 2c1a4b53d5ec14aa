//! Geographic to screen projection
//!
//! `Projector` is the seam to whatever map component owns the view. Points
//! are projected to absolute pixels at the current zoom; subtracting the
//! pixel origin gives screen coordinates.

use std::f64::consts::PI;

use arcline_core::{Point, RepaintSignal, Size};

use crate::geo::{GeoBounds, LatLng};

/// Pixel size of one map tile at zoom 0
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM: f32 = 0.0;
pub const MAX_ZOOM: f32 = 22.0;

pub trait Projector {
    /// Absolute pixel position of `point` at the current zoom
    fn project(&self, point: LatLng) -> Point;

    fn zoom(&self) -> f32;

    /// Absolute pixel position of the viewport's top-left corner
    fn pixel_origin(&self) -> Point;

    /// Geographic region currently on screen
    fn visible_bounds(&self) -> GeoBounds;

    fn viewport_size(&self) -> Size;

    /// Position of `point` relative to the viewport's top-left corner
    fn to_screen(&self, point: LatLng) -> Point {
        let p = self.project(point);
        let origin = self.pixel_origin();
        Point::new(p.x - origin.x, p.y - origin.y)
    }
}

/// World size in pixels at `zoom`
fn world_scale(zoom: f32) -> f64 {
    TILE_SIZE * 2f64.powf(zoom as f64)
}

fn mercator(point: LatLng, scale: f64) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

fn inverse_mercator(x: f64, y: f64, scale: f64) -> LatLng {
    let lng = x / scale * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / scale;
    LatLng::new(n.sinh().atan().to_degrees(), lng)
}

/// A Web Mercator view of the map
#[derive(Clone, Debug)]
pub struct MapViewport {
    center: LatLng,
    zoom: f32,
    size: Size,
    signal: Option<RepaintSignal>,
}

impl MapViewport {
    pub fn new(center: LatLng, zoom: f32, size: Size) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            signal: None,
        }
    }

    /// Request a repaint on `signal` whenever the view moves
    pub fn with_repaint_signal(mut self, signal: RepaintSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Move the view; a repaint is requested only if something changed
    pub fn set_view(&mut self, center: LatLng, zoom: f32) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if center == self.center && zoom == self.zoom {
            return;
        }
        tracing::trace!(?center, zoom, "viewport moved");
        self.center = center;
        self.zoom = zoom;
        self.notify();
    }

    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.notify();
        }
    }

    fn notify(&self) {
        if let Some(signal) = &self.signal {
            signal.request_repaint();
        }
    }

    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = mercator(self.center, world_scale(self.zoom));
        (
            cx - self.size.width as f64 / 2.0,
            cy - self.size.height as f64 / 2.0,
        )
    }
}

impl Projector for MapViewport {
    fn project(&self, point: LatLng) -> Point {
        let (x, y) = mercator(point, world_scale(self.zoom));
        Point::new(x as f32, y as f32)
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn pixel_origin(&self) -> Point {
        let (x, y) = self.origin();
        Point::new(x as f32, y as f32)
    }

    fn visible_bounds(&self) -> GeoBounds {
        let scale = world_scale(self.zoom);
        let (x0, y0) = self.origin();
        let (x1, y1) = (x0 + self.size.width as f64, y0 + self.size.height as f64);
        GeoBounds::from_points(
            inverse_mercator(x0, y1, scale),
            inverse_mercator(x1, y0, scale),
        )
    }

    fn viewport_size(&self) -> Size {
        self.size
    }

    // Computed in f64 so large absolute pixel values at high zoom do not lose
    // sub-pixel precision before the origin is subtracted.
    fn to_screen(&self, point: LatLng) -> Point {
        let (x, y) = mercator(point, world_scale(self.zoom));
        let (ox, oy) = self.origin();
        Point::new((x - ox) as f32, (y - oy) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_project_world_corners() {
        let viewport = MapViewport::new(LatLng::new(0.0, 0.0), 0.0, Size::new(256.0, 256.0));

        let center = viewport.project(LatLng::new(0.0, 0.0));
        assert!((center.x - 128.0).abs() < EPS && (center.y - 128.0).abs() < EPS);

        let west = viewport.project(LatLng::new(0.0, -180.0));
        assert!(west.x.abs() < EPS);

        let north = viewport.project(LatLng::new(MAX_LATITUDE, 0.0));
        assert!(north.y.abs() < EPS);
    }

    #[test]
    fn test_center_maps_to_middle_of_screen() {
        let center = LatLng::new(48.8566, 2.3522);
        let viewport = MapViewport::new(center, 12.0, Size::new(800.0, 600.0));

        let screen = viewport.to_screen(center);
        assert!((screen.x - 400.0).abs() < EPS);
        assert!((screen.y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_zoom_doubles_scale() {
        let a = LatLng::new(10.0, 10.0);
        let b = LatLng::new(-10.0, 30.0);
        let low = MapViewport::new(LatLng::default(), 3.0, Size::new(100.0, 100.0));
        let high = MapViewport::new(LatLng::default(), 4.0, Size::new(100.0, 100.0));

        let span = |v: &MapViewport| v.project(a).distance(v.project(b));
        assert!((span(&high) / span(&low) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_visible_bounds_contain_center() {
        let center = LatLng::new(-33.86, 151.21);
        let viewport = MapViewport::new(center, 10.0, Size::new(640.0, 480.0));
        let bounds = viewport.visible_bounds();

        assert!(bounds.contains(center));
        assert!(bounds.west() < center.lng && bounds.east() > center.lng);
        assert!(bounds.south() < center.lat && bounds.north() > center.lat);
    }

    #[test]
    fn test_moves_request_repaint() {
        let signal = RepaintSignal::new();
        let mut viewport = MapViewport::new(LatLng::default(), 2.0, Size::new(100.0, 100.0))
            .with_repaint_signal(signal.clone());

        viewport.set_view(LatLng::default(), 2.0);
        assert!(!signal.take_needs_repaint());

        viewport.set_view(LatLng::new(1.0, 1.0), 2.0);
        assert!(signal.take_needs_repaint());

        viewport.resize(Size::new(200.0, 100.0));
        assert!(signal.take_needs_repaint());
    }
}
