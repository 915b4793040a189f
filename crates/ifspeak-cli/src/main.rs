//! ifspeak CLI
//!
//! Command-line host for the ifspeak engine: inspect normalization and
//! deltas on captured screens, watch live transcript files, and adjust the
//! stabilization delay.

use clap::{Parser, Subcommand};
use ifspeak_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ifspeak")]
#[command(about = "ifspeak - speak new output of text games", long_about = None)]
struct Cli {
    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the normalized lines of a captured screen
    Normalize(commands::normalize::NormalizeArgs),
    /// Show what would be spoken going from one screen to another
    Diff(commands::diff::DiffArgs),
    /// Announce new output of screen files as they change
    Watch(commands::watch::WatchArgs),
    /// Show or step the stabilization delay
    Delay(commands::delay::DelayArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Normalize(args) => commands::normalize::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Watch(args) => commands::watch::execute(args),
        Commands::Delay(args) => commands::delay::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
