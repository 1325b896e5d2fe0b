//! CLI subcommand implementations.
//!
//! Each subcommand lives in its own module with a clap `Args` struct and a
//! `run` function returning `Result<(), CliError>`.

pub mod common;
pub mod grid;
pub mod simulate;
pub mod tile;
