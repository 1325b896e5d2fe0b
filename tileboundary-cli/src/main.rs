//! Tileboundary CLI - developer tools for the tile-boundary overlay library.
//!
//! Inspects grid computations and simulates view-sync sessions without a
//! host map application. Diagnostic output goes to stderr via `RUST_LOG`;
//! stdout carries only command output.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::process;

use commands::{grid, simulate, tile};

#[derive(Parser)]
#[command(name = "tileboundary")]
#[command(about = "Inspect tile grids and simulate overlay sync sessions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the tile grid covering an extent at a given map scale
    Grid(grid::GridArgs),
    /// Look up a single tile by its z/x/y reference
    Tile(tile::TileArgs),
    /// Simulate a pan/zoom session against the in-memory host
    Simulate(simulate::SimulateArgs),
}

fn main() {
    tileboundary::logging::init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Grid(args) => grid::run(args),
        Command::Tile(args) => tile::run(args),
        Command::Simulate(args) => simulate::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
