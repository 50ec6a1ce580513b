//! staffplan command-line planner.
//!
//! Run with: cargo run -p staffplan-cli -- compare --seed 42

mod cli;
mod commands;
mod error;
mod render;
mod roster;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
