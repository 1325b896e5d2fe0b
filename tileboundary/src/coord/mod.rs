//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (longitude/latitude)
//! and the spherical-mercator plane (EPSG:3857) the tile grid lives in.
//! Everything here is pure math with no state.

use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

/// Spherical earth radius used by the Web Mercator projection, in meters.
pub const EARTH_RADIUS_M: f64 = 6378137.0;

/// Half the projected world width/height in meters (`EARTH_RADIUS_M * PI`).
///
/// The projected world is the square `[-ORIGIN_SHIFT, ORIGIN_SHIFT]` on
/// both axes.
pub const ORIGIN_SHIFT: f64 = 20037508.342789244;

/// Full projected world width/height in meters.
pub const WORLD_SIZE: f64 = 2.0 * ORIGIN_SHIFT;

/// Northernmost latitude representable in the projection, in degrees.
///
/// Equal to `atan(sinh(PI))`; beyond it the projection diverges.
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// Southernmost latitude representable in the projection, in degrees.
pub const MIN_MERCATOR_LAT: f64 = -MAX_MERCATOR_LAT;

/// Errors raised when geographic input falls outside the projection domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    /// Latitude beyond the mercator singularity cutoff.
    #[error("latitude {lat} outside valid range [{MIN_MERCATOR_LAT}, {MAX_MERCATOR_LAT}]")]
    LatitudeOutOfRange { lat: f64 },

    /// Longitude outside [-180, 180].
    #[error("longitude {lon} outside valid range [-180, 180]")]
    LongitudeOutOfRange { lon: f64 },
}

/// Geographic bounding box in degrees (WGS84 longitude/latitude).
///
/// Corners are normalized on construction so `min_*` is never greater than
/// `max_*`, which absorbs inverted extents reported by hosts mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoExtent {
    /// Westernmost longitude.
    pub min_lon: f64,
    /// Southernmost latitude.
    pub min_lat: f64,
    /// Easternmost longitude.
    pub max_lon: f64,
    /// Northernmost latitude.
    pub max_lat: f64,
}

impl GeoExtent {
    /// Creates a new extent, normalizing inverted corners.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        let (min_lon, max_lon) = if min_lon <= max_lon {
            (min_lon, max_lon)
        } else {
            (max_lon, min_lon)
        };
        let (min_lat, max_lat) = if min_lat <= max_lat {
            (min_lat, max_lat)
        } else {
            (max_lat, min_lat)
        };
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// The full world extent covered by the projection.
    pub fn world() -> Self {
        Self::new(-180.0, MIN_MERCATOR_LAT, 180.0, MAX_MERCATOR_LAT)
    }

    /// Center point as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

/// Projected bounding box in mercator meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MercatorExtent {
    /// Westernmost easting.
    pub min_x: f64,
    /// Southernmost northing.
    pub min_y: f64,
    /// Easternmost easting.
    pub max_x: f64,
    /// Northernmost northing.
    pub max_y: f64,
}

impl MercatorExtent {
    /// Creates a new extent, normalizing inverted corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (min_y, max_y) = if min_y <= max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The full projected world square.
    pub fn world() -> Self {
        Self {
            min_x: -ORIGIN_SHIFT,
            min_y: -ORIGIN_SHIFT,
            max_x: ORIGIN_SHIFT,
            max_y: ORIGIN_SHIFT,
        }
    }

    /// Width in projected meters.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height in projected meters.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Whether a projected point lies inside or on the edge of the extent.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Converts a geographic point to mercator meters.
///
/// # Arguments
///
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
///
/// # Returns
///
/// The projected `(x, y)` in meters, or a [`ProjectionError`] when the
/// input lies outside the projection domain.
#[inline]
pub fn lonlat_to_mercator(lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
    if !(MIN_MERCATOR_LAT..=MAX_MERCATOR_LAT).contains(&lat) {
        return Err(ProjectionError::LatitudeOutOfRange { lat });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ProjectionError::LongitudeOutOfRange { lon });
    }

    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * ((PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    Ok((x, y))
}

/// Converts a mercator point back to geographic degrees as `(lon, lat)`.
///
/// Total for any finite input: every projected point maps back into the
/// valid geographic domain.
#[inline]
pub fn mercator_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Projects a geographic extent into mercator meters.
///
/// Fails with [`ProjectionError`] if either corner is outside the projection
/// domain; callers skip the rebuild and keep their last content in that case.
pub fn geo_to_mercator(extent: &GeoExtent) -> Result<MercatorExtent, ProjectionError> {
    let (min_x, min_y) = lonlat_to_mercator(extent.min_lon, extent.min_lat)?;
    let (max_x, max_y) = lonlat_to_mercator(extent.max_lon, extent.max_lat)?;
    Ok(MercatorExtent::new(min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_origin_projects_to_origin() {
        let (x, y) = lonlat_to_mercator(0.0, 0.0).unwrap();
        assert!(x.abs() < EPS, "Expected x near 0, got {}", x);
        // tan/ln rounding leaves a sub-micrometer residue at the equator
        assert!(y.abs() < EPS, "Expected y near 0, got {}", y);
    }

    #[test]
    fn test_known_point() {
        // Upper-left corner of XYZ tile 10/486/332
        let (x, y) = lonlat_to_mercator(-9.140625, 53.33087298301705).unwrap();
        assert!((x - -1017529.7205322663).abs() < EPS, "x: {}", x);
        assert!((y - 7044436.526761846).abs() < EPS, "y: {}", y);
    }

    #[test]
    fn test_world_corners_reach_origin_shift() {
        let (x, y) = lonlat_to_mercator(180.0, MAX_MERCATOR_LAT).unwrap();
        assert!((x - ORIGIN_SHIFT).abs() < 1.0, "x: {}", x);
        assert!((y - ORIGIN_SHIFT).abs() < 1.0, "y: {}", y);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = lonlat_to_mercator(0.0, 90.0);
        assert!(matches!(
            result.unwrap_err(),
            ProjectionError::LatitudeOutOfRange { .. }
        ));
    }

    #[test]
    fn test_invalid_longitude() {
        let result = lonlat_to_mercator(181.0, 0.0);
        assert!(matches!(
            result.unwrap_err(),
            ProjectionError::LongitudeOutOfRange { .. }
        ));
    }

    #[test]
    fn test_mercator_cutoff_is_inclusive() {
        assert!(lonlat_to_mercator(0.0, MAX_MERCATOR_LAT).is_ok());
        assert!(lonlat_to_mercator(0.0, MIN_MERCATOR_LAT).is_ok());
        assert!(lonlat_to_mercator(180.0, 0.0).is_ok());
        assert!(lonlat_to_mercator(-180.0, 0.0).is_ok());
    }

    #[test]
    fn test_geo_extent_normalizes_inverted_corners() {
        let extent = GeoExtent::new(10.0, 54.0, 9.0, 53.0);
        assert_eq!(extent.min_lon, 9.0);
        assert_eq!(extent.max_lon, 10.0);
        assert_eq!(extent.min_lat, 53.0);
        assert_eq!(extent.max_lat, 54.0);
    }

    #[test]
    fn test_mercator_extent_normalizes_inverted_corners() {
        let extent = MercatorExtent::new(500.0, 800.0, -500.0, -800.0);
        assert_eq!(extent.min_x, -500.0);
        assert_eq!(extent.max_x, 500.0);
        assert_eq!(extent.min_y, -800.0);
        assert_eq!(extent.max_y, 800.0);
    }

    #[test]
    fn test_world_extent_projection() {
        let projected = geo_to_mercator(&GeoExtent::world()).unwrap();
        let world = MercatorExtent::world();

        assert!((projected.min_x - world.min_x).abs() < 1.0);
        assert!((projected.max_x - world.max_x).abs() < 1.0);
        assert!((projected.min_y - world.min_y).abs() < 1.0);
        assert!((projected.max_y - world.max_y).abs() < 1.0);
    }

    #[test]
    fn test_extent_projection_propagates_corner_error() {
        let extent = GeoExtent::new(-180.0, -90.0, 180.0, 90.0);
        let result = geo_to_mercator(&extent);
        assert!(matches!(
            result.unwrap_err(),
            ProjectionError::LatitudeOutOfRange { .. }
        ));
    }

    #[test]
    fn test_mercator_extent_geometry() {
        let extent = MercatorExtent::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(extent.width(), 100.0);
        assert_eq!(extent.height(), 50.0);
        assert_eq!(extent.center(), (50.0, 25.0));
        assert!(extent.contains(50.0, 25.0));
        assert!(extent.contains(0.0, 0.0));
        assert!(!extent.contains(-1.0, 0.0));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projection_roundtrip(
                lon in -180.0..180.0_f64,
                lat in -85.0..85.0_f64
            ) {
                let (x, y) = lonlat_to_mercator(lon, lat)?;
                let (lon2, lat2) = mercator_to_lonlat(x, y);

                prop_assert!(
                    (lon2 - lon).abs() < 1e-9,
                    "Longitude roundtrip failed: {} -> {}", lon, lon2
                );
                prop_assert!(
                    (lat2 - lat).abs() < 1e-9,
                    "Latitude roundtrip failed: {} -> {}", lat, lat2
                );
            }

            #[test]
            fn test_projected_points_stay_in_world(
                lon in -180.0..=180.0_f64,
                lat in MIN_MERCATOR_LAT..=MAX_MERCATOR_LAT
            ) {
                let (x, y) = lonlat_to_mercator(lon, lat)?;

                // A meter of slack covers rounding at the extreme corners
                prop_assert!(x.abs() <= ORIGIN_SHIFT + 1.0, "x {} escapes world", x);
                prop_assert!(y.abs() <= ORIGIN_SHIFT + 1.0, "y {} escapes world", y);
            }

            #[test]
            fn test_longitude_monotonic_in_x(
                lon1 in -180.0..0.0_f64,
                lon2 in 0.0..180.0_f64,
                lat in -80.0..80.0_f64
            ) {
                let (x1, _) = lonlat_to_mercator(lon1, lat)?;
                let (x2, _) = lonlat_to_mercator(lon2, lat)?;
                prop_assert!(
                    x1 < x2,
                    "Longitude not monotonic: {} -> {}, {} -> {}", lon1, x1, lon2, x2
                );
            }

            #[test]
            fn test_reject_polar_latitudes(
                lon in -180.0..180.0_f64,
                lat in 85.06..90.0_f64
            ) {
                prop_assert!(lonlat_to_mercator(lon, lat).is_err());
                prop_assert!(lonlat_to_mercator(lon, -lat).is_err());
            }

            #[test]
            fn test_extent_normalization_orders_corners(
                a in -180.0..180.0_f64,
                b in -180.0..180.0_f64,
                c in -85.0..85.0_f64,
                d in -85.0..85.0_f64
            ) {
                let extent = GeoExtent::new(a, c, b, d);
                prop_assert!(extent.min_lon <= extent.max_lon);
                prop_assert!(extent.min_lat <= extent.max_lat);
            }
        }
    }
}
