//! Viewport culling

use crate::geo::GeoBounds;

/// Whether a segment's box touches the visible region
///
/// Symmetric and inclusive: containment, partial overlap and a shared edge
/// all count.
pub fn overlaps(segment: &GeoBounds, viewport: &GeoBounds) -> bool {
    segment.overlaps(viewport)
}
