//! Error types for arcline_map
//!
//! Painting never fails; only building segments from style input does.

use std::io;
use thiserror::Error;

/// A segment style that cannot be drawn
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("{field} must be positive, got {value}")]
    InvalidWidth { field: &'static str, value: f32 },

    #[error("border width must not be negative, got {0}")]
    NegativeBorder(f32),

    #[error("gradient palette is empty")]
    EmptyPalette,

    #[error("endpoint {0:?} is not a finite coordinate")]
    NonFiniteCoordinate(crate::geo::LatLng),
}

/// Errors from loading a curve layer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("dot spacing factor must be finite and at least {min}, got {value}")]
    InvalidDotSpacing { value: f32, min: f32 },

    #[error("segment {index}: {source}")]
    Style {
        index: usize,
        #[source]
        source: StyleError,
    },
}

/// Result type for arcline_map operations
pub type Result<T> = std::result::Result<T, ConfigError>;
