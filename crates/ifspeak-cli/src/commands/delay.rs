//! Delay command
//!
//! Usage: ifspeak delay <show|up|down|press <GESTURE>|gestures> [--config <PATH>]

use clap::{Args, Subcommand};
use ifspeak_core::delay::delay_message;
use ifspeak_core::Command;
use ifspeak_engine::{apply_command, apply_gesture};
use ifspeak_store::config::DEFAULT_CONFIG_FILE;
use ifspeak_store::{shared, ConfigStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DelayArgs {
    #[command(subcommand)]
    pub command: DelayCommand,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum DelayCommand {
    /// Print the current delay
    Show,
    /// Increase the delay by one step and save
    Up,
    /// Decrease the delay by one step and save
    Down,
    /// Run the command bound to an input gesture
    Press {
        /// Gesture identifier, e.g. kb:windows+NVDA+rightArrow
        gesture: String,
    },
    /// List the bound gestures with their input help text
    Gestures,
}

/// Execute delay command
pub fn execute(args: DelayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let command = match args.command {
        DelayCommand::Show => {
            let mut store = ConfigStore::new(&args.config);
            store.load()?;
            let delay = store.delay().unwrap_or_default();
            println!("{}", delay_message(delay));
            return Ok(());
        }
        DelayCommand::Up => Command::IncreaseDelay,
        DelayCommand::Down => Command::DecreaseDelay,
        DelayCommand::Press { gesture } => {
            let config = shared(ConfigStore::new(&args.config));
            let outcome = apply_gesture(&gesture, &config)?;
            println!("{}", outcome.message);
            return Ok(());
        }
        DelayCommand::Gestures => {
            for command in Command::all() {
                println!(
                    "{}\t{}\t{}",
                    command.category(),
                    command.gesture(),
                    command.help()
                );
            }
            return Ok(());
        }
    };

    let config = shared(ConfigStore::new(&args.config));
    let outcome = apply_command(command, &config)?;
    println!("{}", outcome.message);
    Ok(())
}
