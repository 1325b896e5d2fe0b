//! Tile grid module
//!
//! Maps continuous view state onto the discrete tile pyramid: which zoom
//! level a given ground resolution corresponds to, and which tile indices
//! cover a projected extent at that zoom. Supports the two fixed tile
//! schemes (256px XYZ and 512px vector); the scheme decides the resolved
//! zoom, while the tile span at a given zoom is scheme-independent.

mod range;
mod resolve;

pub use range::{tile_range, TileCell, TileCells, TileRange, DEFAULT_PADDING, DEFAULT_TILE_BUDGET};
pub use resolve::{resolution, units_per_pixel_from_scale, zoom_for_units_per_pixel, DEFAULT_DPI};

use crate::coord::MercatorExtent;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest supported zoom level (single world tile).
pub const MIN_ZOOM: u8 = 0;

/// Highest supported zoom level.
pub const MAX_ZOOM: u8 = 22;

/// Errors raised by grid computations and grid-value parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The requested extent/zoom combination covers more tiles than the
    /// safety ceiling allows. Callers skip the rebuild instead of hanging
    /// on pathological inputs.
    #[error("tile range at zoom {zoom} covers {tiles} tiles, exceeding the budget of {budget}")]
    TileBudgetExceeded { zoom: u8, tiles: u64, budget: u64 },

    /// Unrecognized tile scheme name.
    #[error("unknown tile scheme '{input}' (expected 'xyz256' or 'vector512')")]
    UnknownScheme { input: String },

    /// Malformed or out-of-range `z/x/y` tile reference.
    #[error("invalid tile reference '{input}' (expected 'z/x/y' within grid bounds)")]
    InvalidCell { input: String },
}

/// The tile pixel-size convention the overlay follows.
///
/// The scheme is chosen once per activation and never changes while the
/// overlay is active. At identical ground resolution the 512px scheme
/// resolves one zoom level lower than the 256px scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileScheme {
    /// Classic slippy-map tiles, 256px per side.
    Xyz256,
    /// Vector tiles, 512px per side.
    Vector512,
}

impl TileScheme {
    /// Tile edge length in screen pixels.
    pub const fn tile_px(&self) -> u32 {
        match self {
            TileScheme::Xyz256 => 256,
            TileScheme::Vector512 => 512,
        }
    }

    /// Short machine-readable name, accepted back by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            TileScheme::Xyz256 => "xyz256",
            TileScheme::Vector512 => "vector512",
        }
    }
}

impl fmt::Display for TileScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileScheme::Xyz256 => write!(f, "XYZ Tile (256px)"),
            TileScheme::Vector512 => write!(f, "Vector Tile (512px)"),
        }
    }
}

impl FromStr for TileScheme {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xyz256" | "xyz" => Ok(TileScheme::Xyz256),
            "vector512" | "vector" => Ok(TileScheme::Vector512),
            _ => Err(GridError::UnknownScheme {
                input: s.to_string(),
            }),
        }
    }
}

/// Resolves the zoom for a view's ground resolution and computes the padded
/// tile range covering its extent, in one step.
///
/// This is the planning step both the layer manager and the sync controller
/// run; identical view state always yields an identical range.
pub fn covering_range(
    extent: &MercatorExtent,
    units_per_pixel: f64,
    scheme: TileScheme,
    padding: u32,
    budget: u64,
) -> Result<TileRange, GridError> {
    let zoom = zoom_for_units_per_pixel(units_per_pixel, scheme);
    tile_range(extent, zoom, padding, budget)
}
