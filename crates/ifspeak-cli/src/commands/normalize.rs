//! Normalize command
//!
//! Usage: ifspeak normalize <FILE>

use super::read_screen;
use clap::Args;
use ifspeak_core::normalize_lines;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Captured screen, one display row per line
    pub file: PathBuf,
}

/// Execute normalize command
pub fn execute(args: NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_screen(&args.file)?;
    for line in normalize_lines(&raw) {
        println!("{}", line);
    }
    Ok(())
}
