//! Curve layer configuration
//!
//! Layers can be described in TOML:
//!
//! ```toml
//! [options]
//! culling = true
//! animation_period_ms = 1500
//!
//! [[segment]]
//! from = { lat = 51.5074, lng = -0.1278 }
//! to = { lat = 40.7128, lng = -74.0060 }
//! color = "#3366FF"
//! border_width = 2.0
//! border_color = "#000000"
//! gradient = ["#FF0000", "#FFFF00", "#00FF00"]
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use arcline_animation::RepeatingClock;
use arcline_paint::{Color, CompositeOptions, SegmentStyle, DEFAULT_DOT_SPACING_FACTOR};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, StyleError};
use crate::geo::LatLng;
use crate::segment::CurveSegment;

/// A whole curve layer: options plus its segments
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CurveLayerConfig {
    #[serde(default)]
    pub options: CurveLayerOptions,
    #[serde(default, rename = "segment")]
    pub segments: Vec<SegmentConfig>,
}

impl CurveLayerConfig {
    /// Parse a configuration and check its layer options
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.options.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading curve layer config");
        Self::from_toml_str(&source)
    }

    /// Build and validate every segment
    ///
    /// Fails on the first invalid segment, reporting its position.
    pub fn build_segments(&self) -> Result<Vec<CurveSegment>> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, config)| {
                config
                    .to_segment()
                    .map_err(|source| ConfigError::Style { index, source })
            })
            .collect()
    }
}

/// Smallest accepted `dot_spacing_factor`
pub const MIN_DOT_SPACING_FACTOR: f32 = 0.1;

/// Layer-wide rendering options
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CurveLayerOptions {
    /// Skip segments whose bounds miss the visible region
    #[serde(default = "default_true")]
    pub culling: bool,
    /// Dot spacing as a multiple of the base stroke width
    #[serde(default = "default_dot_spacing_factor")]
    pub dot_spacing_factor: f32,
    /// Draw the animated stroke over the whole curve when not animating
    #[serde(default = "default_true")]
    pub overlay_when_static: bool,
    /// Period of the repeating reveal animation
    #[serde(default = "default_animation_period_ms")]
    pub animation_period_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_dot_spacing_factor() -> f32 {
    DEFAULT_DOT_SPACING_FACTOR
}

fn default_animation_period_ms() -> u64 {
    2000
}

impl Default for CurveLayerOptions {
    fn default() -> Self {
        Self {
            culling: default_true(),
            dot_spacing_factor: default_dot_spacing_factor(),
            overlay_when_static: default_true(),
            animation_period_ms: default_animation_period_ms(),
        }
    }
}

impl CurveLayerOptions {
    /// Reject a dot spacing that is not finite or below `MIN_DOT_SPACING_FACTOR`
    pub fn validate(&self) -> Result<()> {
        let value = self.dot_spacing_factor;
        if !value.is_finite() || value < MIN_DOT_SPACING_FACTOR {
            return Err(ConfigError::InvalidDotSpacing {
                value,
                min: MIN_DOT_SPACING_FACTOR,
            });
        }
        Ok(())
    }

    pub fn composite_options(&self) -> CompositeOptions {
        CompositeOptions {
            dot_spacing_factor: self.dot_spacing_factor,
            overlay_when_static: self.overlay_when_static,
        }
    }

    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_period_ms)
    }

    pub fn clock(&self) -> RepeatingClock {
        RepeatingClock::new(self.animation_period())
    }
}

/// One segment as written in configuration, colours as hex strings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SegmentConfig {
    pub from: LatLng,
    pub to: LatLng,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_stroke_width")]
    pub animated_stroke_width: f32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_animated_color")]
    pub animated_color: String,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub gradient: Option<Vec<String>>,
    #[serde(default)]
    pub color_stops: Option<Vec<f32>>,
    #[serde(default)]
    pub dashed: bool,
}

fn default_stroke_width() -> f32 {
    3.0
}

fn default_color() -> String {
    "#0000FF".to_string()
}

fn default_animated_color() -> String {
    "#FFFFFF".to_string()
}

fn parse_color(value: &str) -> std::result::Result<Color, StyleError> {
    Color::from_hex_str(value).ok_or_else(|| StyleError::InvalidColor(value.to_string()))
}

impl SegmentConfig {
    /// Parse colours and validate the resulting segment
    pub fn to_segment(&self) -> std::result::Result<CurveSegment, StyleError> {
        let style = SegmentStyle {
            base_stroke_width: self.stroke_width,
            animated_stroke_width: self.animated_stroke_width,
            base_color: parse_color(&self.color)?,
            animated_color: parse_color(&self.animated_color)?,
            border_width: self.border_width,
            border_color: self.border_color.as_deref().map(parse_color).transpose()?,
            gradient_colors: self
                .gradient
                .as_ref()
                .map(|colors| {
                    colors
                        .iter()
                        .map(|c| parse_color(c))
                        .collect::<std::result::Result<Vec<_>, _>>()
                })
                .transpose()?,
            color_stops: self.color_stops.clone(),
            dashed: self.dashed,
        };

        let segment = CurveSegment::with_style(self.from, self.to, style);
        segment.validate()?;
        Ok(segment)
    }
}
