//! btatool - Create, inspect, and transform BTA array sessions.
//!
//! Every command streams arrays from input to output one element at a
//! time, so sessions larger than memory work over pipes and files alike.

mod cli;
mod commands;
mod output;
mod values;

use anyhow::Result;
use clap::Parser;

use cli::{Args, Command};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Run the appropriate command
    if let Err(e) = run(args) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

/// Main dispatch function.
fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Create(args) => commands::create::run(&args),
        Command::Info(args) => commands::info::run(&args),
        Command::Diff(args) => commands::diff::run(&args),
        Command::Tag(args) => commands::tag::run(&args),
        Command::ComponentConvert(args) => commands::convert::run(&args),
    }
}
