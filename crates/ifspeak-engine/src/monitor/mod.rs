//! Background monitor for one observed display.
//!
//! A monitor owns a dedicated thread that sleeps until the host signals new
//! output, optionally waits for the display to settle, then diffs a fresh
//! snapshot against the previous one. Announcements are handed to a second
//! thread through a channel so a slow speech backend never holds up the next
//! comparison.
//!
//! ## Lifecycle
//!
//! - `Monitor::spawn` takes the initial snapshot and starts waiting
//! - `MonitorHandle::wake` requests a cycle; wakes while busy coalesce
//! - `MonitorHandle::stop` ends the thread promptly, whether it is idle or in
//!   the settle wait; a stop during the settle wait produces no output
//! - dropping the handle stops and joins both threads
//!
//! A failed or panicking snapshot ends only the current cycle, and a
//! panicking announcer loses only the announcement it was given.

mod sources;

pub use sources::{Announcer, DelaySource, FixedDelay, SnapshotProvider};

use ifspeak_core::delay::as_duration;
use ifspeak_core::errors::{ExError, ExErrorKind};
use ifspeak_core::{log_op_end, log_op_error, log_op_start, RawSnapshot, SpeechComposer};
use ifspeak_core_types::{CycleId, MonitorId};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Why a cycle produced no announcement
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("display snapshot failed: {0}")]
    Snapshot(ExError),
    #[error("display snapshot panicked: {0}")]
    Panicked(String),
}

impl From<CycleError> for ExError {
    fn from(err: CycleError) -> Self {
        match err {
            CycleError::Snapshot(inner) => ExError::new(ExErrorKind::SnapshotUnavailable)
                .with_op("monitor_cycle")
                .with_message("display snapshot failed")
                .with_source(inner),
            CycleError::Panicked(reason) => ExError::new(ExErrorKind::Internal)
                .with_op("monitor_cycle")
                .with_message(format!("snapshot provider panicked: {}", reason)),
        }
    }
}

#[derive(Debug, Default)]
struct Flags {
    wake: bool,
    stop: bool,
}

/// Wake/stop flags shared by the handle and the monitor thread
#[derive(Debug, Default)]
struct Signal {
    flags: Mutex<Flags>,
    changed: Condvar,
}

impl Signal {
    fn lock(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wake(&self) {
        self.lock().wake = true;
        self.changed.notify_all();
    }

    fn stop(&self) {
        self.lock().stop = true;
        self.changed.notify_all();
    }

    fn is_stopped(&self) -> bool {
        self.lock().stop
    }

    /// Block until woken or stopped; `false` means stop
    fn wait_for_wake(&self) -> bool {
        let flags = self
            .changed
            .wait_while(self.lock(), |f| !f.wake && !f.stop)
            .unwrap_or_else(PoisonError::into_inner);
        !flags.stop
    }

    /// Wait out the settle delay; `false` means stop was requested meanwhile.
    /// Wakes during the wait do not cut it short.
    fn settle(&self, delay: Duration) -> bool {
        let (flags, _) = self
            .changed
            .wait_timeout_while(self.lock(), delay, |f| !f.stop)
            .unwrap_or_else(PoisonError::into_inner);
        !flags.stop
    }

    /// Clear a pending wake before snapshotting; `false` means stop
    fn begin_cycle(&self) -> bool {
        let mut flags = self.lock();
        if flags.stop {
            return false;
        }
        flags.wake = false;
        true
    }
}

/// State owned by the monitor thread
pub struct Monitor<P> {
    id: MonitorId,
    provider: P,
    delay_source: Arc<dyn DelaySource + Send + Sync>,
    composer: SpeechComposer,
    cycle: CycleId,
}

impl<P: SnapshotProvider> Monitor<P> {
    pub fn new(
        provider: P,
        delay_source: Arc<dyn DelaySource + Send + Sync>,
        composer: SpeechComposer,
    ) -> Self {
        Self {
            id: MonitorId::new(),
            provider,
            delay_source,
            composer,
            cycle: CycleId::INITIAL,
        }
    }

    pub fn id(&self) -> &MonitorId {
        &self.id
    }

    /// Seed the history from the current display. A failed read leaves the
    /// history empty, so everything on screen is new to the first cycle.
    pub fn prime(&mut self) {
        match self.read_display() {
            Ok(raw) => self.composer.prime(raw.normalize()),
            Err(err) => debug!(
                monitor_id = %self.id,
                err_code = ExError::from(err).code(),
                "initial snapshot unavailable, starting with empty history"
            ),
        }
    }

    /// Ask the provider for a snapshot. A panicking provider costs one
    /// cycle, not the monitor thread.
    fn read_display(&self) -> Result<RawSnapshot, CycleError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.provider.snapshot()))
            .map_err(|payload| CycleError::Panicked(panic_reason(payload.as_ref())))?
            .map_err(CycleError::Snapshot)
    }

    /// Take one snapshot and compose what changed since the last one
    pub fn run_cycle(&mut self) -> Result<Option<String>, CycleError> {
        let raw = self.read_display()?;
        let snapshot = raw.normalize();
        debug!(
            monitor_id = %self.id,
            main_lines = snapshot.main.len(),
            other_lines = snapshot.other.len(),
            "snapshot taken"
        );
        Ok(self.composer.compose(&snapshot))
    }

    fn logged_cycle(&mut self) -> Option<String> {
        self.cycle = self.cycle.next();
        let cycle_id = self.cycle.get();
        log_op_start!("monitor_cycle", monitor_id = %self.id, cycle_id = cycle_id);
        let start = Instant::now();

        match self.run_cycle() {
            Ok(said) => {
                log_op_end!(
                    "monitor_cycle",
                    duration_ms = start.elapsed().as_millis() as u64,
                    monitor_id = %self.id,
                    cycle_id = cycle_id,
                    announced = said.is_some()
                );
                said
            }
            Err(err) => {
                log_op_error!(
                    "monitor_cycle",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    monitor_id = %self.id,
                    cycle_id = cycle_id
                );
                None
            }
        }
    }

    fn run(mut self, signal: &Signal, announcements: Sender<String>) {
        self.prime();
        while signal.wait_for_wake() {
            let delay = as_duration(self.delay_source.delay());
            if !delay.is_zero() && !signal.settle(delay) {
                break;
            }
            if !signal.begin_cycle() {
                break;
            }
            if let Some(text) = self.logged_cycle() {
                if announcements.send(text).is_err() {
                    break;
                }
            }
        }
        debug!(monitor_id = %self.id, "monitor stopped");
    }

    /// Start the monitor and announcer threads for an assembled monitor
    pub fn launch<A>(self, announcer: A) -> Result<MonitorHandle, ExError>
    where
        P: Send + 'static,
        A: Announcer + Send + 'static,
    {
        let id = self.id.clone();
        let signal = Arc::new(Signal::default());
        let (tx, rx) = mpsc::channel::<String>();

        let speaker = thread::Builder::new()
            .name(format!("ifspeak-announce-{}", id))
            .spawn({
                let id = id.clone();
                move || {
                    for text in rx {
                        let spoken =
                            panic::catch_unwind(AssertUnwindSafe(|| announcer.announce(&text)));
                        if let Err(payload) = spoken {
                            tracing::error!(
                                monitor_id = %id,
                                reason = %panic_reason(payload.as_ref()),
                                "announcer panicked, announcement dropped"
                            );
                        }
                    }
                }
            })
            .map_err(|e| spawn_error(&id, e))?;

        let worker_signal = Arc::clone(&signal);
        let worker = thread::Builder::new()
            .name(format!("ifspeak-monitor-{}", id))
            .spawn(move || self.run(&worker_signal, tx))
            .map_err(|e| spawn_error(&id, e))?;

        debug!(monitor_id = %id, "monitor started");
        Ok(MonitorHandle {
            id,
            signal,
            worker: Some(worker),
            speaker: Some(speaker),
        })
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn spawn_error(id: &MonitorId, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("monitor_spawn")
        .with_message(format!("could not start thread for monitor {}: {}", id, err))
}

/// Control handle for a running monitor
#[derive(Debug)]
pub struct MonitorHandle {
    id: MonitorId,
    signal: Arc<Signal>,
    worker: Option<JoinHandle<()>>,
    speaker: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn id(&self) -> &MonitorId {
        &self.id
    }

    /// Signal that the display may have changed
    pub fn wake(&self) {
        self.signal.wake();
    }

    /// Ask the monitor to exit; returns immediately
    pub fn stop(&self) {
        self.signal.stop();
    }

    pub fn is_stopping(&self) -> bool {
        self.signal.is_stopped()
    }

    /// True while the monitor thread has not exited
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Stop, then wait for both threads. Queued announcements are still
    /// delivered.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.signal.stop();
        for handle in [self.worker.take(), self.speaker.take()].into_iter().flatten() {
            if handle.join().is_err() {
                tracing::error!(monitor_id = %self.id, "monitor thread panicked");
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<P> Monitor<P> {
    /// Build a monitor and start its threads
    pub fn spawn<A>(
        provider: P,
        announcer: A,
        delay_source: Arc<dyn DelaySource + Send + Sync>,
        composer: SpeechComposer,
    ) -> Result<MonitorHandle, ExError>
    where
        P: SnapshotProvider + Send + 'static,
        A: Announcer + Send + 'static,
    {
        Monitor::new(provider, delay_source, composer).launch(announcer)
    }
}
