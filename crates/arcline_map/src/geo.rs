//! Geographic coordinates and bounds

use serde::{Deserialize, Serialize};

/// Latitude / longitude in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Axis-aligned box in geographic space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl GeoBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest box containing both points
    pub fn from_points(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Inclusive containment
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south()
            && point.lat <= self.north()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }

    /// Inclusive intersection; boxes sharing only an edge or corner overlap
    pub fn overlaps(&self, other: &GeoBounds) -> bool {
        self.west() <= other.east()
            && other.west() <= self.east()
            && self.south() <= other.north()
            && other.south() <= self.north()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_orders_corners() {
        let bounds = GeoBounds::from_points(LatLng::new(10.0, -5.0), LatLng::new(-2.0, 7.0));

        assert_eq!(bounds.south_west, LatLng::new(-2.0, -5.0));
        assert_eq!(bounds.north_east, LatLng::new(10.0, 7.0));
        assert!(bounds.contains(LatLng::new(0.0, 0.0)));
        assert!(bounds.contains(LatLng::new(10.0, 7.0)));
        assert!(!bounds.contains(LatLng::new(11.0, 0.0)));
    }

    #[test]
    fn test_latlng_finite() {
        assert!(LatLng::new(51.5, -0.12).is_finite());
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
        assert_eq!(LatLng::from((1.0, 2.0)), LatLng::new(1.0, 2.0));
    }
}
