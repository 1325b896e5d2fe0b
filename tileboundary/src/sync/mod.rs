//! View synchronization.
//!
//! [`ViewSyncController`] sits between host view-changed notifications and
//! the layer manager. Each notification is planned first: the zoom and
//! covering tile range are computed from a fresh view snapshot, and a
//! rebuild only runs when that range differs from the one last built.
//! Sub-pixel pans that stay inside the current range cost nothing.
//!
//! Notifications that arrive while a rebuild cycle is running (hosts that
//! re-enter through their own redraw handling) are coalesced into a single
//! trailing rebuild against the live view, never queued.

use crate::coord::ProjectionError;
use crate::grid::{covering_range, GridError, TileRange, TileScheme};
use crate::host::{MapView, OverlayCanvas, ViewState};
use crate::layer::{LayerError, OverlayManager};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on trailing rebuild rounds per notification.
///
/// One round suffices for a well-behaved host; the cap stops a host that
/// moves the view during every redraw from spinning the cycle forever.
const MAX_TRAILING_ROUNDS: u8 = 4;

/// Why a sync tick did not rebuild.
///
/// All of these are non-fatal: the previously installed overlay stays up
/// and the next notification re-attempts from scratch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Notification received with no active overlay.
    #[error("overlay is not active")]
    Inactive,

    /// The view extent fell outside the projection domain.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Grid planning failed, typically the tile budget guard.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<LayerError> for SyncError {
    fn from(err: LayerError) -> Self {
        match err {
            LayerError::Grid(grid) => SyncError::Grid(grid),
            LayerError::AlreadyActive { .. } | LayerError::NotActive => SyncError::Inactive,
        }
    }
}

/// What a view-changed notification resulted in.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The overlay was rebuilt with this many tiles.
    Rebuilt { tiles: usize },
    /// The view still resolves to the last-built range; nothing to do.
    Unchanged,
    /// Absorbed into a rebuild cycle already in progress.
    Coalesced,
    /// The tick was skipped; the previous overlay remains installed.
    Skipped { reason: SyncError },
}

/// Cumulative sync counters.
///
/// Plain integers: everything runs on the host's event thread. Counters
/// survive deactivation so a session's totals stay visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub rebuilds: u64,
    pub unchanged: u64,
    pub coalesced: u64,
    pub skipped: u64,
}

impl SyncStats {
    /// Total notifications observed.
    pub fn notifications(&self) -> u64 {
        self.rebuilds + self.unchanged + self.coalesced + self.skipped
    }
}

/// Drives overlay rebuilds from view-changed notifications.
pub struct ViewSyncController {
    padding: u32,
    tile_budget: u64,
    last_range: Option<TileRange>,
    in_progress: bool,
    pending: bool,
    stats: SyncStats,
}

impl ViewSyncController {
    pub fn new(padding: u32, tile_budget: u64) -> Self {
        Self {
            padding,
            tile_budget,
            last_range: None,
            in_progress: false,
            pending: false,
            stats: SyncStats::default(),
        }
    }

    /// Snapshot of the cumulative counters.
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// The tile range of the last completed rebuild, if any.
    pub fn last_range(&self) -> Option<TileRange> {
        self.last_range
    }

    /// Clears change-detection state so the next notification rebuilds
    /// unconditionally. Called on deactivation; counters are kept.
    pub fn reset(&mut self) {
        self.last_range = None;
        self.pending = false;
        self.in_progress = false;
    }

    /// Seeds change detection after an activation's initial build, so an
    /// unchanged view does not trigger a redundant first rebuild.
    pub fn prime(&mut self, view: &ViewState, scheme: TileScheme) {
        self.last_range = covering_range(
            &view.extent,
            view.units_per_pixel,
            scheme,
            self.padding,
            self.tile_budget,
        )
        .ok();
    }

    /// Handles one view-changed notification.
    ///
    /// Re-entry safe: a notification arriving while a cycle runs only marks
    /// it pending and returns [`SyncOutcome::Coalesced`]; the running cycle
    /// then performs a single trailing rebuild against the live view, so
    /// only the latest state is ever honored.
    pub fn view_changed(
        &mut self,
        manager: &mut OverlayManager,
        view: &impl MapView,
        canvas: &mut impl OverlayCanvas,
    ) -> SyncOutcome {
        if self.in_progress {
            self.pending = true;
            self.stats.coalesced += 1;
            debug!("Notification during rebuild, coalescing");
            return SyncOutcome::Coalesced;
        }

        self.in_progress = true;
        let mut outcome = self.sync_once(manager, view, canvas);

        let mut rounds = 0;
        while self.pending && rounds < MAX_TRAILING_ROUNDS {
            self.pending = false;
            debug!(round = rounds + 1, "Trailing rebuild for coalesced notifications");
            outcome = self.sync_once(manager, view, canvas);
            rounds += 1;
        }
        self.pending = false;
        self.in_progress = false;

        outcome
    }

    /// One plan-compare-rebuild pass against the live view.
    fn sync_once(
        &mut self,
        manager: &mut OverlayManager,
        view: &impl MapView,
        canvas: &mut impl OverlayCanvas,
    ) -> SyncOutcome {
        let Some(scheme) = manager.scheme() else {
            self.stats.skipped += 1;
            return SyncOutcome::Skipped {
                reason: SyncError::Inactive,
            };
        };

        let state = match ViewState::capture(view) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "View extent outside projection domain, keeping last overlay");
                self.stats.skipped += 1;
                return SyncOutcome::Skipped { reason: err.into() };
            }
        };

        let range = match covering_range(
            &state.extent,
            state.units_per_pixel,
            scheme,
            self.padding,
            self.tile_budget,
        ) {
            Ok(range) => range,
            Err(err) => {
                warn!(error = %err, "Skipping rebuild");
                self.stats.skipped += 1;
                return SyncOutcome::Skipped { reason: err.into() };
            }
        };

        // Zoom is part of the range, so one comparison covers both the
        // zoom-changed and range-changed conditions
        if self.last_range == Some(range) {
            self.stats.unchanged += 1;
            debug!(zoom = range.zoom, "View change stayed within built range, suppressed");
            return SyncOutcome::Unchanged;
        }

        match manager.rebuild(canvas, &state) {
            Ok(tiles) => {
                self.last_range = Some(range);
                self.stats.rebuilds += 1;
                SyncOutcome::Rebuilt { tiles }
            }
            Err(err) => {
                warn!(error = %err, "Rebuild failed, keeping last overlay");
                self.stats.skipped += 1;
                SyncOutcome::Skipped { reason: err.into() }
            }
        }
    }
}
