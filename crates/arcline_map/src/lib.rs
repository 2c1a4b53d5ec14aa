//! Arcline Map
//!
//! Curved connections between geographic points, drawn over a map.
//!
//! - **Geography**: `LatLng` and `GeoBounds`
//! - **Projection**: the `Projector` seam and a Web Mercator `MapViewport`
//! - **Segments**: `CurveSegment` style records, optionally loaded from TOML
//! - **Layers**: `CurveLayer` culls, projects and composites segments each
//!   repaint; `AnimatedCurveLayer` adds the repeating reveal
//!
//! # Example
//!
//! ```rust
//! use arcline_map::{CurveLayer, CurveSegment, LatLng, MapViewport};
//! use arcline_core::{Color, Size};
//!
//! let mut layer = CurveLayer::default();
//! layer.insert(
//!     CurveSegment::new(LatLng::new(51.5074, -0.1278), LatLng::new(48.8566, 2.3522))
//!         .with_border(2.0, Color::BLACK),
//! );
//!
//! let viewport = MapViewport::new(LatLng::new(50.0, 1.0), 5.0, Size::new(800.0, 600.0));
//! let commands = layer.render(&viewport, Some(0.5));
//! assert!(!commands.is_empty());
//! ```

pub mod config;
pub mod cull;
pub mod error;
pub mod geo;
pub mod layer;
pub mod projection;
pub mod segment;

pub use config::{CurveLayerConfig, CurveLayerOptions, SegmentConfig, MIN_DOT_SPACING_FACTOR};
pub use error::{ConfigError, Result, StyleError};
pub use geo::{GeoBounds, LatLng};
pub use layer::{AnimatedCurveLayer, CurveLayer, ScratchPoints, SegmentId};
pub use projection::{MapViewport, Projector, TILE_SIZE};
pub use segment::CurveSegment;
