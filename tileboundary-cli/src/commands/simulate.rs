//! Session simulation command.
//!
//! Drives the plugin against the in-memory host: toggles the overlay on,
//! pans and zooms the view, and reports what each notification resulted in.
//! Useful for seeing rebuild/suppression behavior without a host map.

use clap::Args;
use tileboundary::grid::{resolution, TileScheme, MAX_ZOOM};
use tileboundary::host::{MemoryCanvas, MemoryMapView, StaticPrompt};
use tileboundary::plugin::{TileBoundaryPlugin, ToggleOutcome};
use tileboundary::sync::SyncOutcome;

use crate::commands::common::{parse_extent, resolve_overlay_config, SchemeArg};
use crate::error::CliError;

/// Arguments for the `simulate` command.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Starting extent as min_lon,min_lat,max_lon,max_lat (decimal degrees)
    #[arg(long, default_value = "9.8,53.4,10.2,53.7")]
    pub extent: String,

    /// Zoom level the starting view resolution is derived from
    #[arg(long, default_value = "12")]
    pub zoom: u8,

    /// Tile scheme the session activates
    #[arg(long, value_enum, default_value = "xyz256")]
    pub scheme: SchemeArg,

    /// Number of large pan steps, each moving east by half the viewport
    #[arg(long, default_value = "3")]
    pub pans: u32,

    /// Print final counters as JSON instead of the session log
    #[arg(long)]
    pub json: bool,
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> Result<(), CliError> {
    if args.zoom > MAX_ZOOM {
        return Err(CliError::Args(format!(
            "Zoom level must be at most {}",
            MAX_ZOOM
        )));
    }

    let geo = parse_extent(&args.extent)?;
    let scheme = TileScheme::from(args.scheme);
    let config = resolve_overlay_config(None, None)?;
    let width = geo.max_lon - geo.min_lon;

    let mut view = MemoryMapView::new(geo, resolution(args.zoom, scheme));
    let mut canvas = MemoryCanvas::new();
    let mut prompt = StaticPrompt::choose(scheme);
    let mut plugin = TileBoundaryPlugin::new(config);
    let mut log: Vec<String> = Vec::new();

    match plugin.toggle(&view, &mut canvas, &mut prompt)? {
        ToggleOutcome::Activated { scheme, tiles } => {
            log.push(format!("{:<12} activated {} with {} tiles", "toggle", scheme, tiles));
        }
        ToggleOutcome::Deactivated => {
            log.push(format!("{:<12} deactivated", "toggle"));
        }
        ToggleOutcome::Cancelled => {
            log.push(format!("{:<12} cancelled, overlay stays off", "toggle"));
        }
    }

    // A notification with no movement exercises the suppression path
    let outcome = plugin.view_changed(&view, &mut canvas);
    log.push(outcome_line("notify", &outcome, &plugin));

    for _ in 0..args.pans {
        view.pan(width / 2.0, 0.0);
        let outcome = plugin.view_changed(&view, &mut canvas);
        log.push(outcome_line("pan east", &outcome, &plugin));
    }

    // A tiny move stays inside the padded range
    view.pan(width / 100.0, 0.0);
    let outcome = plugin.view_changed(&view, &mut canvas);
    log.push(outcome_line("nudge east", &outcome, &plugin));

    view.zoom_by(2.0);
    let outcome = plugin.view_changed(&view, &mut canvas);
    log.push(outcome_line("zoom in", &outcome, &plugin));

    if plugin.toggle(&view, &mut canvas, &mut prompt)? == ToggleOutcome::Deactivated {
        log.push(format!("{:<12} deactivated", "toggle"));
    }

    let stats = plugin.stats();
    if args.json {
        let value = serde_json::json!({
            "rebuilds": stats.rebuilds,
            "unchanged": stats.unchanged,
            "coalesced": stats.coalesced,
            "skipped": stats.skipped,
            "notifications": stats.notifications(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Simulated Session");
    println!("=================");
    println!(
        "  Extent:  {:.4}, {:.4} .. {:.4}, {:.4}",
        geo.min_lon, geo.min_lat, geo.max_lon, geo.max_lat
    );
    println!("  Scheme:  {}", scheme);
    println!("  Zoom:    {}", args.zoom);
    println!();
    for line in &log {
        println!("  {}", line);
    }
    println!();
    println!("Counters");
    println!("========");
    println!("  Notifications: {}", stats.notifications());
    println!("  Rebuilds:      {}", stats.rebuilds);
    println!("  Unchanged:     {}", stats.unchanged);
    println!("  Coalesced:     {}", stats.coalesced);
    println!("  Skipped:       {}", stats.skipped);

    Ok(())
}

/// Format one session step with its sync outcome.
fn outcome_line(label: &str, outcome: &SyncOutcome, plugin: &TileBoundaryPlugin) -> String {
    match outcome {
        SyncOutcome::Rebuilt { tiles } => match plugin.content().map(|c| c.zoom) {
            Some(zoom) => format!("{:<12} rebuilt at zoom {} with {} tiles", label, zoom, tiles),
            None => format!("{:<12} rebuilt with {} tiles", label, tiles),
        },
        SyncOutcome::Unchanged => format!("{:<12} unchanged", label),
        SyncOutcome::Coalesced => format!("{:<12} coalesced", label),
        SyncOutcome::Skipped { reason } => format!("{:<12} skipped ({})", label, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileboundary::config::OverlayConfig;

    #[test]
    fn test_outcome_line_formats_each_variant() {
        let plugin = TileBoundaryPlugin::new(OverlayConfig::default());

        assert_eq!(
            outcome_line("pan east", &SyncOutcome::Rebuilt { tiles: 9 }, &plugin),
            "pan east     rebuilt with 9 tiles"
        );
        assert_eq!(
            outcome_line("notify", &SyncOutcome::Unchanged, &plugin),
            "notify       unchanged"
        );
        assert_eq!(
            outcome_line("notify", &SyncOutcome::Coalesced, &plugin),
            "notify       coalesced"
        );
    }
}
