//! In-memory host implementations.
//!
//! Used by the test suite and the CLI simulator to drive the overlay
//! without a real map application. [`MemoryCanvas`] records every canvas
//! operation so tests can assert on install/replace/remove sequences.

use crate::coord::GeoExtent;
use crate::grid::TileScheme;
use crate::host::{MapView, OverlayCanvas, SchemePrompt};
use crate::overlay::OverlayContent;

/// A settable map view.
#[derive(Debug, Clone)]
pub struct MemoryMapView {
    extent: GeoExtent,
    units_per_pixel: f64,
}

impl MemoryMapView {
    pub fn new(extent: GeoExtent, units_per_pixel: f64) -> Self {
        Self {
            extent,
            units_per_pixel,
        }
    }

    pub fn set_extent(&mut self, extent: GeoExtent) {
        self.extent = extent;
    }

    pub fn set_units_per_pixel(&mut self, units_per_pixel: f64) {
        self.units_per_pixel = units_per_pixel;
    }

    /// Shifts the extent by the given degree offsets, resolution unchanged.
    pub fn pan(&mut self, d_lon: f64, d_lat: f64) {
        self.extent = GeoExtent::new(
            self.extent.min_lon + d_lon,
            self.extent.min_lat + d_lat,
            self.extent.max_lon + d_lon,
            self.extent.max_lat + d_lat,
        );
    }

    /// Zooms around the extent center; `factor > 1` zooms in, shrinking the
    /// extent and refining the resolution by the same factor.
    pub fn zoom_by(&mut self, factor: f64) {
        self.units_per_pixel /= factor;
        let (cx, cy) = self.extent.center();
        let half_w = (self.extent.max_lon - self.extent.min_lon) / (2.0 * factor);
        let half_h = (self.extent.max_lat - self.extent.min_lat) / (2.0 * factor);
        self.extent = GeoExtent::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h);
    }
}

impl MapView for MemoryMapView {
    fn geo_extent(&self) -> GeoExtent {
        self.extent
    }

    fn units_per_pixel(&self) -> f64 {
        self.units_per_pixel
    }
}

/// A canvas that keeps the latest content and counts every operation.
#[derive(Debug, Default)]
pub struct MemoryCanvas {
    current: Option<OverlayContent>,
    pub installs: u32,
    pub replaces: u32,
    pub removals: u32,
    pub redraws: u32,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content most recently installed or replaced, if any.
    pub fn current(&self) -> Option<&OverlayContent> {
        self.current.as_ref()
    }
}

impl OverlayCanvas for MemoryCanvas {
    fn install(&mut self, content: &OverlayContent) {
        self.current = Some(content.clone());
        self.installs += 1;
    }

    fn replace(&mut self, content: &OverlayContent) {
        self.current = Some(content.clone());
        self.replaces += 1;
    }

    fn remove(&mut self) {
        self.current = None;
        self.removals += 1;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

/// A prompt with a preset answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticPrompt {
    choice: Option<TileScheme>,
}

impl StaticPrompt {
    /// Always picks the given scheme.
    pub fn choose(scheme: TileScheme) -> Self {
        Self {
            choice: Some(scheme),
        }
    }

    /// Always cancels.
    pub fn cancel() -> Self {
        Self { choice: None }
    }
}

impl SchemePrompt for StaticPrompt {
    fn choose_scheme(&mut self) -> Option<TileScheme> {
        self.choice
    }
}
