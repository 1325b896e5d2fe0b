//! CLI error handling with user-friendly messages.

use std::fmt;
use tileboundary::coord::ProjectionError;
use tileboundary::grid::GridError;
use tileboundary::plugin::PluginError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Invalid argument value or combination
    Args(String),
    /// Configuration file error
    Config(String),
    /// Grid computation failed
    Grid(GridError),
    /// Geographic input falls outside the projection domain
    Projection(ProjectionError),
    /// Simulated session failed
    Session(PluginError),
    /// JSON output failed
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Args(msg) => write!(f, "Invalid arguments: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Grid(e) => write!(f, "Grid computation failed: {}", e),
            CliError::Projection(e) => write!(f, "Projection failed: {}", e),
            CliError::Session(e) => write!(f, "Simulated session failed: {}", e),
            CliError::Json(e) => write!(f, "Failed to serialize output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Grid(e) => Some(e),
            CliError::Projection(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        CliError::Grid(e)
    }
}

impl From<ProjectionError> for CliError {
    fn from(e: ProjectionError) -> Self {
        CliError::Projection(e)
    }
}

impl From<PluginError> for CliError {
    fn from(e: PluginError) -> Self {
        CliError::Session(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
