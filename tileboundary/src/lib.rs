//! TileBoundary - live map-tile boundary overlay
//!
//! This library computes and maintains a grid of map-tile boundaries (XYZ
//! 256px or vector 512px schemes) over an interactive spherical-mercator
//! map view: resolving the tile zoom from the view's ground resolution,
//! finding the tile indices covering the visible extent, building boundary
//! geometry with `z/x/y` labels, and keeping all of it synchronized with
//! pan/zoom events without redundant rebuilds.
//!
//! # High-Level API
//!
//! Hosts integrate through the [`plugin`] facade and the [`host`] traits:
//!
//! ```ignore
//! use tileboundary::config::OverlayConfig;
//! use tileboundary::plugin::TileBoundaryPlugin;
//!
//! let mut plugin = TileBoundaryPlugin::new(OverlayConfig::default());
//!
//! // Toolbar action:
//! plugin.toggle(&view, &mut canvas, &mut prompt)?;
//!
//! // On every map pan/zoom notification:
//! plugin.view_changed(&view, &mut canvas);
//! ```

pub mod config;
pub mod coord;
pub mod grid;
pub mod host;
pub mod layer;
pub mod logging;
pub mod overlay;
pub mod plugin;
pub mod sync;

/// Version of the TileBoundary library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
