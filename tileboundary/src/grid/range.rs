//! Tile index ranges: which tiles cover a projected extent at a zoom level.

use crate::coord::{MercatorExtent, ORIGIN_SHIFT, WORLD_SIZE};
use crate::grid::{GridError, MAX_ZOOM};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Tiles of padding added on each side of the covering range, so partial
/// tiles clipped at the viewport edge never leave visible gaps.
pub const DEFAULT_PADDING: u32 = 1;

/// Safety ceiling on the number of tiles a single range may cover.
///
/// A stale scale reading combined with a wide extent can ask for millions
/// of tiles; the guard turns that into an error the caller skips.
pub const DEFAULT_TILE_BUDGET: u64 = 10_000;

/// A single tile identified by zoom level and column/row indices.
///
/// Rows count from the top (north) edge of the world, matching the slippy
/// map convention. Formats as `z/x/y` where x is the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCell {
    pub zoom: u8,
    pub col: u32,
    pub row: u32,
}

impl TileCell {
    /// Side length of this tile in projected meters.
    #[inline]
    pub fn span(&self) -> f64 {
        WORLD_SIZE / 2.0_f64.powi(self.zoom as i32)
    }

    /// Projected bounding box of this tile.
    pub fn extent(&self) -> MercatorExtent {
        let span = self.span();
        let min_x = -ORIGIN_SHIFT + self.col as f64 * span;
        let max_y = ORIGIN_SHIFT - self.row as f64 * span;
        MercatorExtent::new(min_x, max_y - span, min_x + span, max_y)
    }

    /// Projected center point of this tile as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        self.extent().center()
    }

    /// Label text shown at the tile center.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TileCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

impl FromStr for TileCell {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidCell {
            input: s.to_string(),
        };

        let mut parts = s.trim().split('/');
        let zoom: u8 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let col: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let row: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        if parts.next().is_some() || zoom > MAX_ZOOM {
            return Err(invalid());
        }

        let max_index = (1u64 << zoom) - 1;
        if col as u64 > max_index || row as u64 > max_index {
            return Err(invalid());
        }

        Ok(TileCell { zoom, col, row })
    }
}

/// Inclusive range of tile indices covering an extent at one zoom level.
///
/// Invariant: `min_col <= max_col`, `min_row <= max_row`, and all indices
/// lie within `[0, 2^zoom - 1]`. Construct through [`tile_range`], which
/// maintains this by clamping at the world edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRange {
    pub zoom: u8,
    pub min_col: u32,
    pub max_col: u32,
    pub min_row: u32,
    pub max_row: u32,
}

impl TileRange {
    /// Number of tiles covered by the range.
    pub fn count(&self) -> u64 {
        let cols = (self.max_col - self.min_col) as u64 + 1;
        let rows = (self.max_row - self.min_row) as u64 + 1;
        cols * rows
    }

    /// Whether a cell lies inside the range (zoom levels must match).
    pub fn contains(&self, cell: &TileCell) -> bool {
        cell.zoom == self.zoom
            && (self.min_col..=self.max_col).contains(&cell.col)
            && (self.min_row..=self.max_row).contains(&cell.row)
    }

    /// Iterates the cells of the range in row-major order: rows from north
    /// to south, columns west to east within each row.
    pub fn cells(&self) -> TileCells {
        TileCells {
            zoom: self.zoom,
            min_col: self.min_col,
            max_col: self.max_col,
            max_row: self.max_row,
            col: self.min_col,
            row: self.min_row,
            done: false,
        }
    }
}

impl fmt::Display for TileRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z{} cols {}..={} rows {}..={}",
            self.zoom, self.min_col, self.max_col, self.min_row, self.max_row
        )
    }
}

/// Row-major iterator over the cells of a [`TileRange`].
pub struct TileCells {
    zoom: u8,
    min_col: u32,
    max_col: u32,
    max_row: u32,
    col: u32,
    row: u32,
    done: bool,
}

impl Iterator for TileCells {
    type Item = TileCell;

    fn next(&mut self) -> Option<TileCell> {
        if self.done {
            return None;
        }

        let cell = TileCell {
            zoom: self.zoom,
            col: self.col,
            row: self.row,
        };

        if self.col < self.max_col {
            self.col += 1;
        } else if self.row < self.max_row {
            self.col = self.min_col;
            self.row += 1;
        } else {
            self.done = true;
        }

        Some(cell)
    }
}

/// Computes the inclusive tile index range covering a projected extent.
///
/// The tile span at zoom z is `WORLD_SIZE / 2^z`, independent of the tile
/// pixel size — pixel size decides which zoom the resolver picks, not the
/// ground span of a tile at that zoom. `padding` extra tiles are added on
/// every side, then indices are clamped to `[0, 2^z - 1]`.
///
/// Fails with [`GridError::TileBudgetExceeded`] when the padded, clamped
/// range covers more than `budget` tiles.
pub fn tile_range(
    extent: &MercatorExtent,
    zoom: u8,
    padding: u32,
    budget: u64,
) -> Result<TileRange, GridError> {
    let span = WORLD_SIZE / 2.0_f64.powi(zoom as i32);
    let max_index = (1i64 << zoom) - 1;
    let pad = padding as i64;

    // Columns count from the west edge, rows from the north edge.
    let col_lo = ((extent.min_x + ORIGIN_SHIFT) / span).floor() as i64 - pad;
    let col_hi = ((extent.max_x + ORIGIN_SHIFT) / span).floor() as i64 + pad;
    let row_lo = ((ORIGIN_SHIFT - extent.max_y) / span).floor() as i64 - pad;
    let row_hi = ((ORIGIN_SHIFT - extent.min_y) / span).floor() as i64 + pad;

    let range = TileRange {
        zoom,
        min_col: col_lo.clamp(0, max_index) as u32,
        max_col: col_hi.clamp(0, max_index) as u32,
        min_row: row_lo.clamp(0, max_index) as u32,
        max_row: row_hi.clamp(0, max_index) as u32,
    };

    let tiles = range.count();
    if tiles > budget {
        return Err(GridError::TileBudgetExceeded {
            zoom,
            tiles,
            budget,
        });
    }

    Ok(range)
}
