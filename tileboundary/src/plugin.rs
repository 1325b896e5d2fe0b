//! Plugin facade: the toggle action and the view-changed entry point.
//!
//! A host binds its toolbar/menu action to [`TileBoundaryPlugin::toggle`]
//! and forwards map-view change events to
//! [`TileBoundaryPlugin::view_changed`] while the overlay is active. One
//! plugin instance owns at most one overlay; toggling while active tears it
//! down, toggling while inactive prompts for a scheme and builds it.

use crate::config::OverlayConfig;
use crate::coord::ProjectionError;
use crate::grid::TileScheme;
use crate::host::{MapView, OverlayCanvas, SchemePrompt, ViewState};
use crate::layer::{LayerError, OverlayManager};
use crate::overlay::{OverlayContent, OverlayStyle};
use crate::sync::{SyncOutcome, SyncStats, ViewSyncController};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the toggle action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// The current view cannot be projected, so there is nothing to build.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// What a toggle invocation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleOutcome {
    /// Overlay built and installed.
    Activated { scheme: TileScheme, tiles: usize },
    /// Overlay removed.
    Deactivated,
    /// The user cancelled the scheme prompt; nothing changed.
    Cancelled,
}

/// The process-wide overlay toggle.
pub struct TileBoundaryPlugin {
    manager: OverlayManager,
    controller: ViewSyncController,
}

impl TileBoundaryPlugin {
    pub fn new(config: OverlayConfig) -> Self {
        let controller = ViewSyncController::new(config.padding, config.tile_budget);
        Self {
            manager: OverlayManager::new(config),
            controller,
        }
    }

    /// Whether the overlay is currently up.
    pub fn is_active(&self) -> bool {
        self.manager.is_active()
    }

    /// Scheme of the active overlay, if any.
    pub fn scheme(&self) -> Option<TileScheme> {
        self.manager.scheme()
    }

    /// The installed overlay content, if any.
    pub fn content(&self) -> Option<&OverlayContent> {
        self.manager.content()
    }

    /// Drawing attributes the host should render the content with.
    pub fn style(&self) -> &OverlayStyle {
        &self.manager.config().style
    }

    /// Cumulative sync counters for this plugin instance.
    pub fn stats(&self) -> SyncStats {
        self.controller.stats()
    }

    /// Flips the overlay on or off.
    ///
    /// Off -> on: prompts for a scheme (a cancelled prompt aborts with no
    /// side effects), captures the view and installs the initial overlay.
    /// On -> off: removes the overlay and clears sync state. Counters
    /// survive across toggles.
    pub fn toggle(
        &mut self,
        view: &impl MapView,
        canvas: &mut impl OverlayCanvas,
        prompt: &mut impl SchemePrompt,
    ) -> Result<ToggleOutcome, PluginError> {
        if self.manager.is_active() {
            self.manager.deactivate(canvas)?;
            self.controller.reset();
            return Ok(ToggleOutcome::Deactivated);
        }

        let Some(scheme) = prompt.choose_scheme() else {
            debug!("Scheme prompt cancelled, overlay stays off");
            return Ok(ToggleOutcome::Cancelled);
        };

        let state = ViewState::capture(view)?;
        let tiles = self.manager.activate(canvas, scheme, &state)?;
        self.controller.prime(&state, scheme);
        info!(scheme = %scheme, tiles, "Toggled on");

        Ok(ToggleOutcome::Activated { scheme, tiles })
    }

    /// Forwards a host view-changed notification to the sync controller.
    pub fn view_changed(
        &mut self,
        view: &impl MapView,
        canvas: &mut impl OverlayCanvas,
    ) -> SyncOutcome {
        self.controller
            .view_changed(&mut self.manager, view, canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoExtent;
    use crate::grid::resolution;
    use crate::host::{MemoryCanvas, MemoryMapView, StaticPrompt};
    use crate::sync::SyncError;

    fn plugin() -> TileBoundaryPlugin {
        TileBoundaryPlugin::new(OverlayConfig::default())
    }

    fn city_view() -> MemoryMapView {
        MemoryMapView::new(
            GeoExtent::new(-0.2, 51.45, 0.0, 51.55),
            resolution(12, TileScheme::Xyz256),
        )
    }

    #[test]
    fn test_toggle_activates_then_deactivates() {
        let mut plugin = plugin();
        let view = city_view();
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::choose(TileScheme::Xyz256);

        let on = plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        assert!(matches!(
            on,
            ToggleOutcome::Activated {
                scheme: TileScheme::Xyz256,
                ..
            }
        ));
        assert!(plugin.is_active());
        assert_eq!(canvas.installs, 1);

        let off = plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        assert_eq!(off, ToggleOutcome::Deactivated);
        assert!(!plugin.is_active());
        assert_eq!(canvas.removals, 1);
        assert!(canvas.current().is_none());
    }

    #[test]
    fn test_cancelled_prompt_has_no_side_effects() {
        let mut plugin = plugin();
        let view = city_view();
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::cancel();

        let outcome = plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        assert_eq!(outcome, ToggleOutcome::Cancelled);
        assert!(!plugin.is_active());
        assert_eq!(canvas.installs, 0);
        assert_eq!(canvas.redraws, 0);
    }

    #[test]
    fn test_activation_primes_suppression() {
        let mut plugin = plugin();
        let view = city_view();
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::choose(TileScheme::Xyz256);

        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();

        // The host typically fires a notification right after the initial
        // install; the unchanged view must not rebuild
        let outcome = plugin.view_changed(&view, &mut canvas);
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(canvas.replaces, 0);
    }

    #[test]
    fn test_view_changes_drive_rebuilds_until_toggle_off() {
        let mut plugin = plugin();
        let mut view = city_view();
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::choose(TileScheme::Vector512);

        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        assert_eq!(plugin.scheme(), Some(TileScheme::Vector512));
        // 512px tiles resolve one below the 256px zoom at this resolution
        assert_eq!(plugin.content().unwrap().zoom, 11);

        view.zoom_by(2.0);
        let outcome = plugin.view_changed(&view, &mut canvas);
        assert!(matches!(outcome, SyncOutcome::Rebuilt { .. }));
        assert_eq!(plugin.content().unwrap().zoom, 12);

        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        let outcome = plugin.view_changed(&view, &mut canvas);
        assert_eq!(
            outcome,
            SyncOutcome::Skipped {
                reason: SyncError::Inactive
            }
        );
    }

    #[test]
    fn test_toggle_on_unprojectable_view_fails_cleanly() {
        let mut plugin = plugin();
        let view = MemoryMapView::new(GeoExtent::new(0.0, 86.0, 1.0, 89.0), 10.0);
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::choose(TileScheme::Xyz256);

        let err = plugin.toggle(&view, &mut canvas, &mut prompt).unwrap_err();
        assert!(matches!(err, PluginError::Projection(_)));
        assert!(!plugin.is_active());
        assert_eq!(canvas.installs, 0);
    }

    #[test]
    fn test_stats_survive_toggle_cycles() {
        let mut plugin = plugin();
        let mut view = city_view();
        let mut canvas = MemoryCanvas::new();
        let mut prompt = StaticPrompt::choose(TileScheme::Xyz256);

        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap();
        view.zoom_by(2.0);
        plugin.view_changed(&view, &mut canvas);
        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap(); // off
        plugin.toggle(&view, &mut canvas, &mut prompt).unwrap(); // on again

        let stats = plugin.stats();
        assert_eq!(stats.rebuilds, 1);

        // Fresh activation re-primed suppression for the current view
        let outcome = plugin.view_changed(&view, &mut canvas);
        assert_eq!(outcome, SyncOutcome::Unchanged);
    }

    #[test]
    fn test_style_defaults_exposed_to_host() {
        let plugin = plugin();
        assert_eq!(plugin.style(), &OverlayStyle::default());
    }
}
