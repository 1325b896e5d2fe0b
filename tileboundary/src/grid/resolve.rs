//! Zoom resolution: continuous ground resolution to integer zoom level.

use crate::coord::WORLD_SIZE;
use crate::grid::{TileScheme, MAX_ZOOM, MIN_ZOOM};

/// Logical DPI assumed when converting a cartographic scale denominator.
pub const DEFAULT_DPI: f64 = 96.0;

/// Inches per meter, the bridge between scale denominator and screen pixels.
const INCHES_PER_M: f64 = 39.37;

/// Ground resolution of a zoom level in projected meters per pixel.
///
/// Exact inverse of [`zoom_for_units_per_pixel`] at integer zoom levels.
#[inline]
pub fn resolution(zoom: u8, scheme: TileScheme) -> f64 {
    WORLD_SIZE / (scheme.tile_px() as f64 * 2.0_f64.powi(zoom as i32))
}

/// Converts a cartographic scale denominator (the N of 1:N) and logical DPI
/// to projected meters per screen pixel.
#[inline]
pub fn units_per_pixel_from_scale(scale_denominator: f64, dpi: f64) -> f64 {
    scale_denominator / (INCHES_PER_M * dpi)
}

/// Resolves the tile zoom level whose resolution best matches the observed
/// ground resolution.
///
/// Computes `log2(WORLD_SIZE / (tile_px * units_per_pixel))` and rounds to
/// the nearest integer, with ties rounding DOWN toward the lower zoom so a
/// resolution exactly between two levels favors fewer, larger tiles. The
/// result is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
///
/// Total function: zero, negative or NaN readings saturate to [`MAX_ZOOM`],
/// where the tile budget guard rejects any oversized range downstream.
/// Never panics.
pub fn zoom_for_units_per_pixel(units_per_pixel: f64, scheme: TileScheme) -> u8 {
    let raw = (WORLD_SIZE / (scheme.tile_px() as f64 * units_per_pixel)).log2();
    if raw.is_nan() {
        return MAX_ZOOM;
    }
    // Round half down: ceil(z - 0.5)
    let rounded = (raw - 0.5).ceil();
    rounded.clamp(MIN_ZOOM as f64, MAX_ZOOM as f64) as u8
}
