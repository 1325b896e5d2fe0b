//! Host collaborator seams.
//!
//! The overlay core never talks to a concrete map application; it reads
//! view state through [`MapView`], pushes drawable content through
//! [`OverlayCanvas`] and asks the user for a scheme through
//! [`SchemePrompt`]. Everything runs synchronously on the host's event
//! thread, so the traits take `&mut self` instead of carrying `Send`/`Sync`
//! bounds.
//!
//! In-memory implementations for tests and tooling live in [`memory`].

pub mod memory;

pub use memory::{MemoryCanvas, MemoryMapView, StaticPrompt};

use crate::coord::{geo_to_mercator, GeoExtent, MercatorExtent, ProjectionError};
use crate::grid::TileScheme;
use crate::overlay::OverlayContent;

/// Read access to the host's current map view.
///
/// Pull-based: the core calls these at rebuild time rather than tracking
/// incremental view deltas.
pub trait MapView {
    /// Current visible extent in geographic degrees.
    fn geo_extent(&self) -> GeoExtent;

    /// Current ground resolution in projected meters per screen pixel.
    fn units_per_pixel(&self) -> f64;
}

/// The drawing surface the overlay registers its content with.
///
/// Content is handed over by reference; the layer manager keeps the single
/// owned copy. A host implementation typically converts the content into
/// its own scene graph on `install`/`replace`.
pub trait OverlayCanvas {
    /// Registers freshly built content. Called once per activation.
    fn install(&mut self, content: &OverlayContent);

    /// Swaps in rebuilt content, replacing whatever was installed.
    fn replace(&mut self, content: &OverlayContent);

    /// Removes the overlay from the canvas entirely.
    fn remove(&mut self);

    /// Asks the host to repaint after a content change.
    fn request_redraw(&mut self);
}

/// Asks the user which tile scheme to overlay.
///
/// Returning `None` means the user cancelled; activation is aborted with no
/// side effects.
pub trait SchemePrompt {
    fn choose_scheme(&mut self) -> Option<TileScheme>;
}

/// Immutable snapshot of the host view at one sync tick.
///
/// Captured fresh for every rebuild and replaced wholesale, never mutated;
/// the projected extent and the resolution always describe the same moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Visible extent in projected meters.
    pub extent: MercatorExtent,
    /// Ground resolution in projected meters per pixel.
    pub units_per_pixel: f64,
}

impl ViewState {
    /// Reads the live view and projects its extent.
    ///
    /// Fails with [`ProjectionError`] when the host reports an extent
    /// outside the projection domain (for example a globe view tilted past
    /// the mercator latitude cutoff); the caller then skips the rebuild.
    pub fn capture(view: &impl MapView) -> Result<Self, ProjectionError> {
        let extent = geo_to_mercator(&view.geo_extent())?;
        Ok(ViewState {
            extent,
            units_per_pixel: view.units_per_pixel(),
        })
    }
}
