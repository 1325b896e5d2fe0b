//! Tile lookup command.
//!
//! Inspects a single tile by its `z/x/y` reference: projected bounds, the
//! geographic footprint, and the label size the overlay would use.

use clap::Args;
use tileboundary::coord::mercator_to_lonlat;
use tileboundary::grid::TileCell;
use tileboundary::overlay::label_font_size;

use crate::commands::common::OutputFormat;
use crate::error::CliError;

/// Arguments for the `tile` command.
#[derive(Debug, Args)]
pub struct TileArgs {
    /// Tile reference as z/x/y (e.g. 15/16370/10896)
    pub cell: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Run the tile command.
pub fn run(args: TileArgs) -> Result<(), CliError> {
    let cell: TileCell = args.cell.parse()?;

    match args.format {
        OutputFormat::Table => print_table(&cell),
        OutputFormat::Json => print_json(&cell)?,
        OutputFormat::Geojson => print_geojson(&cell)?,
    }

    Ok(())
}

fn print_table(cell: &TileCell) {
    let extent = cell.extent();
    let (cx, cy) = cell.center();
    let (west, south) = mercator_to_lonlat(extent.min_x, extent.min_y);
    let (east, north) = mercator_to_lonlat(extent.max_x, extent.max_y);
    let (lon, lat) = mercator_to_lonlat(cx, cy);

    println!("Tile {}", cell);
    println!();
    println!("  Zoom:        {}", cell.zoom);
    println!("  Column:      {}", cell.col);
    println!("  Row:         {}", cell.row);
    println!("  Span:        {:.3} m", cell.span());
    println!(
        "  Projected:   {:.3}, {:.3} .. {:.3}, {:.3}",
        extent.min_x, extent.min_y, extent.max_x, extent.max_y
    );
    println!(
        "  Geographic:  {:.6}, {:.6} .. {:.6}, {:.6}",
        west, south, east, north
    );
    println!("  Center:      {:.6}, {:.6}", lon, lat);
    println!("  Label size:  {} pt", label_font_size(cell.zoom));
}

fn print_json(cell: &TileCell) -> Result<(), CliError> {
    let extent = cell.extent();
    let (cx, cy) = cell.center();
    let (west, south) = mercator_to_lonlat(extent.min_x, extent.min_y);
    let (east, north) = mercator_to_lonlat(extent.max_x, extent.max_y);
    let (lon, lat) = mercator_to_lonlat(cx, cy);

    let value = serde_json::json!({
        "cell": cell.to_string(),
        "zoom": cell.zoom,
        "col": cell.col,
        "row": cell.row,
        "span_m": cell.span(),
        "extent": extent,
        "geographic": { "west": west, "south": south, "east": east, "north": north },
        "center": { "lon": lon, "lat": lat },
        "label_point_size": label_font_size(cell.zoom),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_geojson(cell: &TileCell) -> Result<(), CliError> {
    let extent = cell.extent();
    let (west, south) = mercator_to_lonlat(extent.min_x, extent.min_y);
    let (east, north) = mercator_to_lonlat(extent.max_x, extent.max_y);

    // Counterclockwise exterior ring per RFC 7946
    let ring = [
        [west, north],
        [west, south],
        [east, south],
        [east, north],
        [west, north],
    ];

    let collection = serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": {
                "cell": cell.to_string(),
                "zoom": cell.zoom,
                "col": cell.col,
                "row": cell.row,
            },
        }],
    });

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}
