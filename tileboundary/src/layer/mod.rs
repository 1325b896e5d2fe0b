//! Overlay layer lifecycle.
//!
//! [`OverlayManager`] owns the single overlay: inactive until activated
//! with a tile scheme, then rebuilt against view snapshots until
//! deactivated. The scheme is fixed for the lifetime of an activation.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = OverlayManager::new(OverlayConfig::default());
//! let tiles = manager.activate(&mut canvas, TileScheme::Xyz256, &view_state)?;
//! // ... on every view change:
//! manager.rebuild(&mut canvas, &view_state)?;
//! // ... on toggle-off:
//! manager.deactivate(&mut canvas)?;
//! ```

use crate::config::OverlayConfig;
use crate::grid::{covering_range, GridError, TileScheme};
use crate::host::{OverlayCanvas, ViewState};
use crate::overlay::{build_content, OverlayContent};
use thiserror::Error;
use tracing::{debug, info};

/// State-machine and grid errors from overlay operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// Activation requested while an overlay is already up.
    #[error("overlay already active with scheme {scheme}")]
    AlreadyActive { scheme: TileScheme },

    /// Rebuild or deactivation requested with no active overlay.
    #[error("overlay is not active")]
    NotActive,

    /// Grid computation failed; the installed overlay is left untouched.
    #[error(transparent)]
    Grid(#[from] GridError),
}

struct ActiveOverlay {
    scheme: TileScheme,
    content: OverlayContent,
}

/// Owns the overlay content and its activation state.
pub struct OverlayManager {
    active: Option<ActiveOverlay>,
    config: OverlayConfig,
}

impl OverlayManager {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            active: None,
            config,
        }
    }

    /// Whether an overlay is currently installed.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The scheme of the active overlay, if any.
    pub fn scheme(&self) -> Option<TileScheme> {
        self.active.as_ref().map(|a| a.scheme)
    }

    /// The currently installed content, if any.
    pub fn content(&self) -> Option<&OverlayContent> {
        self.active.as_ref().map(|a| &a.content)
    }

    /// The configuration the manager plans with.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Builds the initial overlay for a view and installs it on the canvas.
    ///
    /// Atomic: if the initial grid computation fails, no overlay is
    /// installed and the manager stays inactive. Returns the tile count.
    pub fn activate(
        &mut self,
        canvas: &mut impl OverlayCanvas,
        scheme: TileScheme,
        view: &ViewState,
    ) -> Result<usize, LayerError> {
        if let Some(active) = &self.active {
            return Err(LayerError::AlreadyActive {
                scheme: active.scheme,
            });
        }

        let content = self.build_for(scheme, view)?;
        let tiles = content.tile_count();
        let zoom = content.zoom;
        canvas.install(&content);
        canvas.request_redraw();
        self.active = Some(ActiveOverlay { scheme, content });

        info!(scheme = %scheme, zoom, tiles, "Overlay activated");
        Ok(tiles)
    }

    /// Rebuilds the overlay content from a fresh view snapshot.
    ///
    /// Idempotent for identical snapshots. The new content is fully built
    /// before the canvas sees it; on error the installed content is left
    /// exactly as it was. Returns the tile count.
    pub fn rebuild(
        &mut self,
        canvas: &mut impl OverlayCanvas,
        view: &ViewState,
    ) -> Result<usize, LayerError> {
        let scheme = self
            .active
            .as_ref()
            .map(|a| a.scheme)
            .ok_or(LayerError::NotActive)?;

        let content = self.build_for(scheme, view)?;
        let tiles = content.tile_count();
        debug!(zoom = content.zoom, tiles, "Overlay rebuilt");

        canvas.replace(&content);
        canvas.request_redraw();
        // Checked active above; unreachable None
        if let Some(active) = self.active.as_mut() {
            active.content = content;
        }
        Ok(tiles)
    }

    /// Removes the overlay from the canvas and returns to the inactive
    /// state. Deactivating an inactive manager is a caller bug and errors.
    pub fn deactivate(&mut self, canvas: &mut impl OverlayCanvas) -> Result<(), LayerError> {
        if self.active.is_none() {
            return Err(LayerError::NotActive);
        }

        self.active = None;
        canvas.remove();
        canvas.request_redraw();
        info!("Overlay deactivated");
        Ok(())
    }

    fn build_for(&self, scheme: TileScheme, view: &ViewState) -> Result<OverlayContent, LayerError> {
        let range = covering_range(
            &view.extent,
            view.units_per_pixel,
            scheme,
            self.config.padding,
            self.config.tile_budget,
        )?;
        Ok(build_content(&range, scheme))
    }
}
