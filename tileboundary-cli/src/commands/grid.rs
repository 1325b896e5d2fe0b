//! Grid inspection command.
//!
//! Resolves the tile zoom and covering range for a geographic extent at a
//! given resolution or cartographic scale, then prints the resulting overlay
//! content as a summary table, JSON, or GeoJSON.

use clap::Args;
use tileboundary::coord::{geo_to_mercator, mercator_to_lonlat, GeoExtent};
use tileboundary::grid::{covering_range, resolution, units_per_pixel_from_scale, DEFAULT_DPI};
use tileboundary::overlay::{build_content, OverlayContent};

use crate::commands::common::{parse_extent, resolve_overlay_config, OutputFormat, SchemeArg};
use crate::error::CliError;

/// Arguments for the `grid` command.
#[derive(Debug, Args)]
pub struct GridArgs {
    /// Geographic extent as min_lon,min_lat,max_lon,max_lat (decimal degrees)
    #[arg(long)]
    pub extent: String,

    /// Ground resolution in projected meters per screen pixel
    #[arg(long, conflicts_with = "scale")]
    pub upp: Option<f64>,

    /// Cartographic scale denominator (the N of 1:N), converted at --dpi
    #[arg(long)]
    pub scale: Option<f64>,

    /// Screen resolution used for the --scale conversion
    #[arg(long, default_value_t = DEFAULT_DPI)]
    pub dpi: f64,

    /// Tile scheme deciding how resolution maps to zoom
    #[arg(long, value_enum, default_value = "xyz256")]
    pub scheme: SchemeArg,

    /// Tiles of padding around the covering range (default from config)
    #[arg(long)]
    pub padding: Option<u32>,

    /// Maximum tiles before the range is rejected (default from config)
    #[arg(long)]
    pub budget: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Run the grid command.
pub fn run(args: GridArgs) -> Result<(), CliError> {
    let geo = parse_extent(&args.extent)?;
    let extent = geo_to_mercator(&geo)?;
    let scheme = args.scheme.into();

    let upp = match (args.upp, args.scale) {
        (Some(upp), _) => upp,
        (None, Some(denominator)) => units_per_pixel_from_scale(denominator, args.dpi),
        (None, None) => {
            return Err(CliError::Args(
                "Provide a resolution with --upp or a scale denominator with --scale".to_string(),
            ))
        }
    };
    if !(upp.is_finite() && upp > 0.0) {
        return Err(CliError::Args(format!(
            "Resolution must be a positive number, got {}",
            upp
        )));
    }

    let config = resolve_overlay_config(args.padding, args.budget)?;
    let range = covering_range(&extent, upp, scheme, config.padding, config.tile_budget)?;
    let content = build_content(&range, scheme);
    tracing::debug!(upp, zoom = content.zoom, tiles = content.tile_count(), "Resolved grid");

    match args.format {
        OutputFormat::Table => print_table(&geo, upp, &content),
        OutputFormat::Json => print_json(&content)?,
        OutputFormat::Geojson => print_geojson(&content)?,
    }

    Ok(())
}

/// Print a human-readable grid summary.
fn print_table(geo: &GeoExtent, upp: f64, content: &OverlayContent) {
    let range = &content.range;

    println!("Tile Grid");
    println!("=========");
    println!(
        "  Extent:      {:.4}, {:.4} .. {:.4}, {:.4}",
        geo.min_lon, geo.min_lat, geo.max_lon, geo.max_lat
    );
    println!("  Scheme:      {}", content.scheme);
    println!("  Resolution:  {:.6} m/px", upp);
    println!("  Zoom:        {}", content.zoom);
    println!(
        "  Native:      {:.6} m/px",
        resolution(content.zoom, content.scheme)
    );
    println!("  Columns:     {}..={}", range.min_col, range.max_col);
    println!("  Rows:        {}..={}", range.min_row, range.max_row);
    println!("  Tiles:       {}", content.tile_count());
    println!("  Label size:  {} pt", content.label_point_size);
}

/// Print the full overlay content as JSON.
fn print_json(content: &OverlayContent) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(content)?);
    Ok(())
}

/// Print the grid as a GeoJSON FeatureCollection.
///
/// Boundaries become Polygon features, labels become Point features, both in
/// geographic coordinates so the output loads directly in GIS tools.
fn print_geojson(content: &OverlayContent) -> Result<(), CliError> {
    let mut features = Vec::with_capacity(content.lines.len() + content.labels.len());

    for line in &content.lines {
        // The drawing ring runs clockwise; RFC 7946 wants counterclockwise
        // exterior rings, so emit it reversed.
        let ring: Vec<[f64; 2]> = line
            .ring
            .iter()
            .rev()
            .map(|&(x, y)| {
                let (lon, lat) = mercator_to_lonlat(x, y);
                [lon, lat]
            })
            .collect();

        features.push(serde_json::json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": {
                "cell": line.cell.to_string(),
                "zoom": line.cell.zoom,
                "col": line.cell.col,
                "row": line.cell.row,
            },
        }));
    }

    for label in &content.labels {
        let (lon, lat) = mercator_to_lonlat(label.x, label.y);
        features.push(serde_json::json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lon, lat] },
            "properties": {
                "label": label.text,
                "point_size": content.label_point_size,
            },
        }));
    }

    let collection = serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    });

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}
