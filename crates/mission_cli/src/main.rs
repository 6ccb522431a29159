//! `mission` command-line host for the dashboard core.
//!
//! # Responsibility
//! - Parse arguments, load config, start logging, open the record store.
//! - Read the wall clock once and pass it down explicitly.
//! - Print every result as JSON on stdout.

use clap::Parser;

mod cli;
mod commands;

fn main() {
    if let Err(error) = run() {
        eprintln!("mission error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    commands::dispatch(cli)
}
