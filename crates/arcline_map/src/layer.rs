//! Curve layer render pass
//!
//! A `CurveLayer` owns the segment records. Each call to `paint` culls them
//! against the visible region, projects the survivors into a scratch map that
//! belongs to that call alone, and composites each one into the draw context.
//! Nothing computed during a pass is kept afterwards.

use std::time::Duration;

use arcline_animation::{TickCallbackId, Ticker};
use arcline_core::{DrawCommand, DrawContext, Point, RepaintSignal};
use arcline_paint::{composite, screen_points, PaintContext};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::config::{CurveLayerConfig, CurveLayerOptions};
use crate::cull;
use crate::error::Result;
use crate::geo::GeoBounds;
use crate::projection::Projector;
use crate::segment::CurveSegment;

new_key_type! {
    /// Handle to a segment in a `CurveLayer`
    pub struct SegmentId;
}

/// Projected screen points per segment for one pass
pub type ScratchPoints = FxHashMap<SegmentId, SmallVec<[Point; 3]>>;

#[derive(Clone, Debug)]
struct SegmentEntry {
    segment: CurveSegment,
    /// Fixed when the entry is created; `None` when culling is off
    bounds: Option<GeoBounds>,
}

/// A set of curves drawn together
#[derive(Clone, Debug, Default)]
pub struct CurveLayer {
    segments: SlotMap<SegmentId, SegmentEntry>,
    order: Vec<SegmentId>,
    options: CurveLayerOptions,
}

impl CurveLayer {
    pub fn new(options: CurveLayerOptions) -> Self {
        Self {
            segments: SlotMap::with_key(),
            order: Vec::new(),
            options,
        }
    }

    /// Build a layer from configuration, validating the options and every segment
    pub fn from_config(config: &CurveLayerConfig) -> Result<Self> {
        config.options.validate()?;
        let mut layer = Self::new(config.options.clone());
        for segment in config.build_segments()? {
            layer.insert(segment);
        }
        tracing::debug!(segments = layer.len(), "curve layer built from config");
        Ok(layer)
    }

    pub fn options(&self) -> &CurveLayerOptions {
        &self.options
    }

    fn entry(&self, segment: CurveSegment) -> SegmentEntry {
        let bounds = self.options.culling.then(|| segment.bounds());
        SegmentEntry { segment, bounds }
    }

    /// Add a segment on top of the existing ones
    pub fn insert(&mut self, segment: CurveSegment) -> SegmentId {
        let entry = self.entry(segment);
        let id = self.segments.insert(entry);
        self.order.push(id);
        id
    }

    /// Swap in a new record at the same paint position
    ///
    /// Its bounds are computed afresh. Returns the previous segment.
    pub fn replace(&mut self, id: SegmentId, segment: CurveSegment) -> Option<CurveSegment> {
        let entry = self.entry(segment);
        let slot = self.segments.get_mut(id)?;
        Some(std::mem::replace(slot, entry).segment)
    }

    pub fn remove(&mut self, id: SegmentId) -> Option<CurveSegment> {
        let entry = self.segments.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(entry.segment)
    }

    /// Replace every segment
    pub fn set_segments(&mut self, segments: impl IntoIterator<Item = CurveSegment>) {
        self.clear();
        for segment in segments {
            self.insert(segment);
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.order.clear();
    }

    pub fn get(&self, id: SegmentId) -> Option<&CurveSegment> {
        self.segments.get(id).map(|entry| &entry.segment)
    }

    /// Bounds recorded for culling, if any
    pub fn bounds(&self, id: SegmentId) -> Option<GeoBounds> {
        self.segments.get(id).and_then(|entry| entry.bounds)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Segments in paint order
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &CurveSegment)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|segment| (id, segment)))
    }

    /// Cull and project every segment into a fresh scratch map
    ///
    /// Culled segments are never projected. Non-finite projections are
    /// dropped point by point.
    pub fn project(&self, projector: &dyn Projector) -> ScratchPoints {
        let viewport = self
            .options
            .culling
            .then(|| projector.visible_bounds());

        let mut scratch = ScratchPoints::default();
        for (id, entry) in self.order.iter().filter_map(|&id| Some((id, self.segments.get(id)?))) {
            if let (Some(bounds), Some(viewport)) = (&entry.bounds, &viewport) {
                if !cull::overlaps(bounds, viewport) {
                    tracing::trace!(?id, "segment culled");
                    continue;
                }
            }

            let points = screen_points(
                entry
                    .segment
                    .endpoints()
                    .into_iter()
                    .map(|point| projector.to_screen(point))
                    .filter(Point::is_finite),
            );
            scratch.insert(id, points);
        }
        scratch
    }

    /// Paint every visible segment into `ctx`
    ///
    /// Returns how many segments produced output. A segment that cannot be
    /// drawn is skipped without affecting the others. `progress` is clamped
    /// to `0.0..=1.0` when the overlay is truncated; NaN reveals nothing.
    pub fn paint(
        &self,
        ctx: &mut dyn DrawContext,
        projector: &dyn Projector,
        progress: Option<f32>,
    ) -> usize {
        let options = self.options.composite_options();
        let scratch = self.project(projector);

        let mut drawn = 0;
        for (id, segment) in self.iter() {
            let Some(points) = scratch.get(&id) else {
                continue;
            };
            if composite(ctx, points, segment.style(), progress, &options) {
                drawn += 1;
            } else {
                tracing::debug!(?id, "segment has no usable screen points");
            }
        }
        tracing::trace!(drawn, total = self.len(), "curve layer painted");
        drawn
    }

    /// Paint into a fresh context sized to the viewport and return its commands
    pub fn render(&self, projector: &dyn Projector, progress: Option<f32>) -> Vec<DrawCommand> {
        let mut ctx = PaintContext::from_size(projector.viewport_size());
        self.paint(&mut ctx, projector, progress);
        ctx.take_commands()
    }
}

/// A curve layer with its reveal animation
///
/// `tick` advances the clock and raises the repaint signal; the next `paint`
/// draws with the new progress. Stopping the animation paints the static
/// curves.
#[derive(Debug)]
pub struct AnimatedCurveLayer {
    layer: CurveLayer,
    ticker: Ticker,
}

impl AnimatedCurveLayer {
    pub fn new(layer: CurveLayer) -> Self {
        let ticker = Ticker::new(layer.options().clock());
        Self { layer, ticker }
    }

    pub fn from_config(config: &CurveLayerConfig) -> Result<Self> {
        Ok(Self::new(CurveLayer::from_config(config)?))
    }

    /// Share a repaint signal with the host (and the map viewport)
    pub fn with_repaint_signal(mut self, signal: RepaintSignal) -> Self {
        self.ticker = self.ticker.with_repaint_signal(signal);
        self
    }

    pub fn repaint_signal(&self) -> &RepaintSignal {
        self.ticker.repaint_signal()
    }

    pub fn layer(&self) -> &CurveLayer {
        &self.layer
    }

    /// Mutable access to the segments; requests a repaint
    pub fn layer_mut(&mut self) -> &mut CurveLayer {
        self.ticker.repaint_signal().request_repaint();
        &mut self.layer
    }

    pub fn on_tick<F>(&mut self, callback: F) -> TickCallbackId
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.ticker.on_tick(callback)
    }

    pub fn remove_tick_callback(&mut self, id: TickCallbackId) -> bool {
        self.ticker.remove_tick_callback(id)
    }

    pub fn tick(&mut self, dt: Duration) -> Option<f32> {
        self.ticker.tick(dt)
    }

    pub fn start(&mut self) {
        self.ticker.start();
        self.ticker.repaint_signal().request_repaint();
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
        self.ticker.repaint_signal().request_repaint();
    }

    pub fn is_animating(&self) -> bool {
        self.ticker.is_playing()
    }

    /// Current reveal progress, `None` while stopped
    pub fn progress(&self) -> Option<f32> {
        self.ticker.is_playing().then(|| self.ticker.progress())
    }

    pub fn paint(&self, ctx: &mut dyn DrawContext, projector: &dyn Projector) -> usize {
        self.layer.paint(ctx, projector, self.progress())
    }

    pub fn render(&self, projector: &dyn Projector) -> Vec<DrawCommand> {
        self.layer.render(projector, self.progress())
    }
}
