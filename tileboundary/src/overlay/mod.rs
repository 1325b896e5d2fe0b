//! Overlay content: boundary geometry and labels for a tile range.
//!
//! The builder turns a tile index range into the full set of features the
//! host draws. Content is always regenerated wholesale, never patched
//! incrementally, so two builds from the same range compare equal and no
//! stale geometry can survive a rebuild.

pub mod style;

pub use style::{label_font_size, OverlayStyle, Rgb, MAX_LABEL_PT, MIN_LABEL_PT};

use crate::grid::{TileCell, TileRange, TileScheme};
use serde::Serialize;

/// Closed rectangular boundary of one tile.
///
/// The ring holds the four corners plus the first corner repeated, starting
/// at the northwest corner and running clockwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryLine {
    pub cell: TileCell,
    pub ring: [(f64, f64); 5],
}

/// Label anchored at the center of one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLabel {
    pub cell: TileCell,
    /// Text shown at the anchor, `z/x/y`.
    pub text: String,
    /// Anchor easting in projected meters.
    pub x: f64,
    /// Anchor northing in projected meters.
    pub y: f64,
}

/// Everything the host draws for one rebuild: boundary rings and labels in
/// row-major cell order, plus the zoom-derived label size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayContent {
    pub scheme: TileScheme,
    pub zoom: u8,
    pub range: TileRange,
    /// Label point size for this zoom, from [`label_font_size`].
    pub label_point_size: u8,
    pub lines: Vec<BoundaryLine>,
    pub labels: Vec<TileLabel>,
}

impl OverlayContent {
    /// Number of tiles represented in this content.
    pub fn tile_count(&self) -> usize {
        self.lines.len()
    }
}

/// Builds the complete overlay content for a tile range.
///
/// Cells are visited in the range's row-major order, so identical ranges
/// always produce identical content.
pub fn build_content(range: &TileRange, scheme: TileScheme) -> OverlayContent {
    let count = range.count() as usize;
    let mut lines = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    for cell in range.cells() {
        let tile = cell.extent();
        let nw = (tile.min_x, tile.max_y);
        let ne = (tile.max_x, tile.max_y);
        let se = (tile.max_x, tile.min_y);
        let sw = (tile.min_x, tile.min_y);
        lines.push(BoundaryLine {
            cell,
            ring: [nw, ne, se, sw, nw],
        });

        let (x, y) = cell.center();
        labels.push(TileLabel {
            cell,
            text: cell.label(),
            x,
            y,
        });
    }

    OverlayContent {
        scheme,
        zoom: range.zoom,
        range: *range,
        label_point_size: label_font_size(range.zoom),
        lines,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::ORIGIN_SHIFT;
    use crate::grid::{tile_range, DEFAULT_TILE_BUDGET};

    fn sample_range() -> TileRange {
        TileRange {
            zoom: 10,
            min_col: 485,
            max_col: 487,
            min_row: 331,
            max_row: 333,
        }
    }

    #[test]
    fn test_one_line_and_label_per_cell() {
        let content = build_content(&sample_range(), TileScheme::Xyz256);
        assert_eq!(content.tile_count(), 9);
        assert_eq!(content.lines.len(), 9);
        assert_eq!(content.labels.len(), 9);
        assert_eq!(content.zoom, 10);
        assert_eq!(content.label_point_size, 8);
    }

    #[test]
    fn test_rings_are_closed_rectangles() {
        let content = build_content(&sample_range(), TileScheme::Xyz256);
        for line in &content.lines {
            let ring = &line.ring;
            assert_eq!(ring[0], ring[4], "Ring must close on its first point");

            let tile = line.cell.extent();
            assert_eq!(ring[0], (tile.min_x, tile.max_y));
            assert_eq!(ring[1], (tile.max_x, tile.max_y));
            assert_eq!(ring[2], (tile.max_x, tile.min_y));
            assert_eq!(ring[3], (tile.min_x, tile.min_y));
        }
    }

    #[test]
    fn test_labels_anchor_at_tile_centers() {
        let content = build_content(&sample_range(), TileScheme::Xyz256);
        for label in &content.labels {
            let (cx, cy) = label.cell.center();
            assert_eq!((label.x, label.y), (cx, cy));
            assert_eq!(label.text, label.cell.to_string());
        }
    }

    #[test]
    fn test_cells_emitted_in_row_major_order() {
        let content = build_content(&sample_range(), TileScheme::Xyz256);
        let cells: Vec<(u32, u32)> = content.lines.iter().map(|l| (l.cell.col, l.cell.row)).collect();
        assert_eq!(
            cells,
            vec![
                (485, 331),
                (486, 331),
                (487, 331),
                (485, 332),
                (486, 332),
                (487, 332),
                (485, 333),
                (486, 333),
                (487, 333),
            ]
        );
    }

    #[test]
    fn test_identical_ranges_build_identical_content() {
        let range = sample_range();
        let a = build_content(&range, TileScheme::Xyz256);
        let b = build_content(&range, TileScheme::Xyz256);
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_serializes_with_stable_field_names() {
        // Downstream JSON consumers key on these names
        let content = build_content(&sample_range(), TileScheme::Xyz256);
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["scheme"], "Xyz256");
        assert_eq!(json["zoom"], 10);
        assert_eq!(json["label_point_size"], 8);
        assert_eq!(json["range"]["min_col"], 485);
        assert_eq!(json["lines"].as_array().unwrap().len(), 9);
        assert_eq!(json["lines"][0]["cell"]["col"], 485);
        assert_eq!(json["labels"][0]["text"], "10/485/331");
    }

    #[test]
    fn test_world_tile_content() {
        let world = crate::coord::MercatorExtent::world();
        let range = tile_range(&world, 0, 1, DEFAULT_TILE_BUDGET).unwrap();
        let content = build_content(&range, TileScheme::Xyz256);

        assert_eq!(content.tile_count(), 1);
        assert_eq!(content.labels[0].text, "0/0/0");
        assert_eq!(content.label_point_size, 16);

        let ring = &content.lines[0].ring;
        assert_eq!(ring[0], (-ORIGIN_SHIFT, ORIGIN_SHIFT));
        assert_eq!(ring[2], (ORIGIN_SHIFT, -ORIGIN_SHIFT));
    }
}
