//! Overlay configuration.
//!
//! [`OverlayConfig`] carries the tunables with sensible defaults; an
//! optional INI file under the user config directory can override them
//! (see [`file`]). Code constructs configs directly with the `with_*`
//! builders; the file loader is for end users of the tooling.

mod file;

pub use file::{config_file_path, load_config, load_or_default, ConfigError};

use crate::grid::{DEFAULT_PADDING, DEFAULT_TILE_BUDGET};
use crate::overlay::OverlayStyle;

/// Tunables for grid computation and overlay drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Tiles of padding added on each side of the covering range.
    pub padding: u32,
    /// Safety ceiling on tiles per rebuild.
    pub tile_budget: u64,
    /// Drawing attributes handed to the host.
    pub style: OverlayStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            tile_budget: DEFAULT_TILE_BUDGET,
            style: OverlayStyle::default(),
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-side range padding in tiles.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the per-rebuild tile ceiling.
    pub fn with_tile_budget(mut self, budget: u64) -> Self {
        self.tile_budget = budget;
        self
    }

    /// Sets the drawing style.
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }
}
