//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use tileboundary::config::{config_file_path, load_or_default, OverlayConfig};
use tileboundary::coord::GeoExtent;
use tileboundary::grid::TileScheme;

use crate::error::CliError;

/// Tile scheme selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SchemeArg {
    /// Classic slippy-map tiles, 256px per side
    Xyz256,
    /// Vector tiles, 512px per side
    Vector512,
}

impl From<SchemeArg> for TileScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Xyz256 => TileScheme::Xyz256,
            SchemeArg::Vector512 => TileScheme::Vector512,
        }
    }
}

/// Output format selection for inspection commands.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    /// Human-readable summary
    Table,
    /// Full content as JSON
    Json,
    /// GeoJSON FeatureCollection for GIS tools
    Geojson,
}

/// Parse a `min_lon,min_lat,max_lon,max_lat` extent argument.
///
/// Corner order does not matter; the extent is normalized on construction.
pub fn parse_extent(s: &str) -> Result<GeoExtent, CliError> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| extent_error(s))?;

    if parts.len() != 4 {
        return Err(extent_error(s));
    }

    Ok(GeoExtent::new(parts[0], parts[1], parts[2], parts[3]))
}

fn extent_error(input: &str) -> CliError {
    CliError::Args(format!(
        "Invalid extent '{}'. Expected 'min_lon,min_lat,max_lon,max_lat' in decimal degrees.",
        input
    ))
}

/// Resolve grid settings from CLI args and the config file.
///
/// CLI takes precedence, then the config file, then built-in defaults.
pub fn resolve_overlay_config(
    cli_padding: Option<u32>,
    cli_budget: Option<u64>,
) -> Result<OverlayConfig, CliError> {
    let mut config = match config_file_path() {
        Some(path) => load_or_default(&path).map_err(|e| CliError::Config(e.to_string()))?,
        None => OverlayConfig::default(),
    };

    if let Some(padding) = cli_padding {
        config.padding = padding;
    }
    if let Some(budget) = cli_budget {
        if budget == 0 {
            return Err(CliError::Args(
                "Tile budget must be at least 1".to_string(),
            ));
        }
        config.tile_budget = budget;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extent_four_values() {
        let extent = parse_extent("9.8,53.4,10.2,53.7").unwrap();
        assert_eq!(extent, GeoExtent::new(9.8, 53.4, 10.2, 53.7));
    }

    #[test]
    fn test_parse_extent_tolerates_spaces() {
        let extent = parse_extent(" -0.2, 51.45, 0.0, 51.55 ").unwrap();
        assert_eq!(extent, GeoExtent::new(-0.2, 51.45, 0.0, 51.55));
    }

    #[test]
    fn test_parse_extent_normalizes_corner_order() {
        let extent = parse_extent("10.2,53.7,9.8,53.4").unwrap();
        assert_eq!(extent, GeoExtent::new(9.8, 53.4, 10.2, 53.7));
    }

    #[test]
    fn test_parse_extent_rejects_malformed_input() {
        for input in ["", "1,2,3", "1,2,3,4,5", "a,b,c,d", "1;2;3;4"] {
            assert!(parse_extent(input).is_err(), "'{}' should not parse", input);
        }
    }

    #[test]
    fn test_scheme_arg_maps_to_scheme() {
        assert_eq!(TileScheme::from(SchemeArg::Xyz256), TileScheme::Xyz256);
        assert_eq!(
            TileScheme::from(SchemeArg::Vector512),
            TileScheme::Vector512
        );
    }
}
