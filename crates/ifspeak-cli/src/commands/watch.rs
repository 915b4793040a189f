//! Watch command
//!
//! Usage: ifspeak watch <FILE> [--other <FILE>] [--config <PATH>] [--poll-ms <N>]
//!        [--help-style] [--cycles <N>]
//!
//! Treats each file as a live display region. Whenever a file's size or
//! modification time changes the monitor is woken; announcements are
//! printed to stdout, one per line.

use super::read_screen;
use clap::Args;
use ifspeak_core::errors::{ExError, IfSpeakError};
use ifspeak_core::{RawSnapshot, SpeechComposer, SpeechProfile};
use ifspeak_engine::{DelaySource, Monitor};
use ifspeak_store::config::DEFAULT_CONFIG_FILE;
use ifspeak_store::{shared, ConfigStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Main region screen file
    pub file: PathBuf,

    /// Secondary region screen file (status line, side window)
    #[arg(long)]
    pub other: Option<PathBuf>,

    /// Config file holding the stabilization delay
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// How often to check the files for changes
    #[arg(long, default_value_t = 100)]
    pub poll_ms: u64,

    /// Fold Inform-style help menu selection changes
    #[arg(long)]
    pub help_style: bool,

    /// Exit after this many comparisons
    #[arg(long)]
    pub cycles: Option<u64>,
}

type Stamp = Option<(SystemTime, u64)>;

fn stamp(path: &Path) -> Stamp {
    let meta = std::fs::metadata(path).ok()?;
    Some((meta.modified().ok()?, meta.len()))
}

fn read_region(path: &Path) -> Result<Vec<String>, ExError> {
    read_screen(path).map_err(|e| {
        ExError::from(IfSpeakError::SnapshotUnavailable {
            reason: e.to_string(),
        })
        .with_op("read_screen")
        .with_path(path.display().to_string())
    })
}

/// Execute watch command
pub fn execute(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = shared(ConfigStore::new(&args.config));
    if let Ok(mut store) = config.write() {
        if let Err(err) = store.load() {
            warn!(
                config = %args.config.display(),
                err_code = err.code(),
                "config unavailable, watching without a settle delay"
            );
        }
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    let reads = Arc::new(AtomicU64::new(0));
    let provider = {
        let main = args.file.clone();
        let other = args.other.clone();
        let reads = Arc::clone(&reads);
        move || -> Result<RawSnapshot, ExError> {
            let snapshot = read_region(&main).and_then(|main| {
                let other = match &other {
                    Some(path) => read_region(path)?,
                    None => Vec::new(),
                };
                Ok(RawSnapshot { main, other })
            });
            reads.fetch_add(1, Ordering::SeqCst);
            snapshot
        }
    };
    let announcer = |text: &str| {
        let mut out = std::io::stdout().lock();
        if writeln!(out, "{}", text).and_then(|_| out.flush()).is_err() {
            warn!("stdout closed, announcement dropped");
        }
    };

    let profile = SpeechProfile {
        inform_style_help: args.help_style,
        ..SpeechProfile::default()
    };
    let delay_source: Arc<dyn DelaySource + Send + Sync> = config.clone();
    let handle = Monitor::spawn(
        provider,
        announcer,
        delay_source,
        SpeechComposer::new(profile),
    )?;
    info!(monitor_id = %handle.id(), file = %args.file.display(), "watching");

    let watched: Vec<&Path> = std::iter::once(args.file.as_path())
        .chain(args.other.as_deref())
        .collect();
    let mut last: Vec<Stamp> = watched.iter().map(|p| stamp(p)).collect();
    let poll = Duration::from_millis(args.poll_ms.max(1));

    loop {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        // The initial read is not a comparison.
        let compared = reads.load(Ordering::SeqCst).saturating_sub(1);
        if args.cycles.is_some_and(|limit| compared >= limit) {
            break;
        }

        std::thread::sleep(poll);
        let now: Vec<Stamp> = watched.iter().map(|p| stamp(p)).collect();
        if now != last {
            last = now;
            handle.wake();
        }
    }

    handle.join();
    Ok(())
}
