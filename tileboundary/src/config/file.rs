//! INI config file loading.
//!
//! The file is optional; absent keys keep their defaults and an absent file
//! is not an error for [`load_or_default`]. Format:
//!
//! ```ini
//! [grid]
//! padding = 1
//! tile_budget = 10000
//!
//! [style]
//! line_color = 255,0,0
//! line_width_mm = 0.3
//! label_color = 0,0,0
//! label_buffer_color = 255,255,255
//! label_buffer_mm = 1.0
//! ```

use crate::config::OverlayConfig;
use crate::overlay::Rgb;
use ini::Ini;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// File name under the per-user config directory.
const CONFIG_DIR_NAME: &str = "tileboundary";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or is not valid INI.
    #[error("failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// A key parsed but holds an unusable value.
    #[error("invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Standard location of the user config file, if a config directory exists
/// on this platform.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads a config file, strictly: a missing or malformed file is an error.
pub fn load_config(path: &Path) -> Result<OverlayConfig, ConfigError> {
    let ini = Ini::load_from_file(path)?;
    let mut config = OverlayConfig::default();

    if let Some(section) = ini.section(Some("grid")) {
        if let Some(raw) = section.get("padding") {
            config.padding = parse_value("grid", "padding", raw, "a tile count")?;
        }
        if let Some(raw) = section.get("tile_budget") {
            let budget: u64 = parse_value("grid", "tile_budget", raw, "a tile count")?;
            if budget == 0 {
                return Err(invalid("grid", "tile_budget", raw, "must be at least 1"));
            }
            config.tile_budget = budget;
        }
    }

    if let Some(section) = ini.section(Some("style")) {
        if let Some(raw) = section.get("line_color") {
            config.style.line_color = parse_color("style", "line_color", raw)?;
        }
        if let Some(raw) = section.get("line_width_mm") {
            let width: f64 = parse_value("style", "line_width_mm", raw, "a width in mm")?;
            if !width.is_finite() || width <= 0.0 {
                return Err(invalid("style", "line_width_mm", raw, "must be positive"));
            }
            config.style.line_width_mm = width;
        }
        if let Some(raw) = section.get("label_color") {
            config.style.label_color = parse_color("style", "label_color", raw)?;
        }
        if let Some(raw) = section.get("label_buffer_color") {
            config.style.label_buffer_color = parse_color("style", "label_buffer_color", raw)?;
        }
        if let Some(raw) = section.get("label_buffer_mm") {
            let buffer: f64 = parse_value("style", "label_buffer_mm", raw, "a size in mm")?;
            if !buffer.is_finite() || buffer < 0.0 {
                return Err(invalid(
                    "style",
                    "label_buffer_mm",
                    raw,
                    "must be zero or positive",
                ));
            }
            config.style.label_buffer_mm = buffer;
        }
    }

    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Loads a config file if it exists, falling back to defaults when absent.
///
/// A file that exists but fails to parse still errors; silent fallback is
/// reserved for the missing-file case only.
pub fn load_or_default(path: &Path) -> Result<OverlayConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(OverlayConfig::default());
    }
    load_config(path)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    raw: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(section, key, raw, &format!("expected {}", expected)))
}

/// Parses an `r,g,b` triple with components in 0..=255.
fn parse_color(section: &str, key: &str, raw: &str) -> Result<Rgb, ConfigError> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid(section, key, raw, "expected 'r,g,b'"));
    }

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| invalid(section, key, raw, "components must be 0-255"))?;
    }
    Ok(Rgb::new(rgb[0], rgb[1], rgb[2]))
}
