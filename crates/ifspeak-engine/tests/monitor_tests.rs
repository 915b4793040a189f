#![allow(clippy::unwrap_used, clippy::expect_used)]

use ifspeak_core::errors::{ExError, ExErrorKind};
use ifspeak_core::logging_facility::test_capture::init_test_capture;
use ifspeak_core::{RawSnapshot, SpeechComposer, SpeechProfile};
use ifspeak_core::logging_facility::test_capture::CapturedEvent;
use ifspeak_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, FIELD_ERR_CODE, FIELD_MAIN_LINES, FIELD_MONITOR_ID,
    FIELD_OTHER_LINES,
};
use ifspeak_engine::{DelaySource, FixedDelay, Monitor, MonitorHandle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const PATIENCE: Duration = Duration::from_secs(5);

/// A fake display the test can redraw, plus counters for the monitor's reads
#[derive(Clone)]
struct FakeDisplay {
    screen: Arc<Mutex<RawSnapshot>>,
    reads: Arc<AtomicUsize>,
    broken: Arc<AtomicBool>,
    crash_once: Arc<AtomicBool>,
}

impl FakeDisplay {
    fn new(main: &[&str]) -> Self {
        let display = Self {
            screen: Arc::new(Mutex::new(RawSnapshot::default())),
            reads: Arc::new(AtomicUsize::new(0)),
            broken: Arc::new(AtomicBool::new(false)),
            crash_once: Arc::new(AtomicBool::new(false)),
        };
        display.show(main);
        display
    }

    fn show(&self, main: &[&str]) {
        *self.screen.lock().unwrap() =
            RawSnapshot::main_only(main.iter().map(|s| s.to_string()).collect());
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn provider(&self) -> impl Fn() -> Result<RawSnapshot, ExError> + Send + 'static {
        let display = self.clone();
        move || {
            if display.crash_once.swap(false, Ordering::SeqCst) {
                display.reads.fetch_add(1, Ordering::SeqCst);
                panic!("display driver crashed");
            }
            let result = if display.broken.load(Ordering::SeqCst) {
                Err(ExError::new(ExErrorKind::SnapshotUnavailable)
                    .with_message("window went away"))
            } else {
                Ok(display.screen.lock().unwrap().clone())
            };
            // Counted only once the read is complete.
            display.reads.fetch_add(1, Ordering::SeqCst);
            result
        }
    }
}

fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = Instant::now() + PATIENCE;
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn start(display: &FakeDisplay, delay: f64) -> (MonitorHandle, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let announcer = move |text: &str| {
        let _ = tx.send(text.to_string());
    };
    start_with(display, delay, announcer, rx)
}

fn start_with(
    display: &FakeDisplay,
    delay: f64,
    announcer: impl Fn(&str) + Send + 'static,
    rx: Receiver<String>,
) -> (MonitorHandle, Receiver<String>) {
    let delay_source: Arc<dyn DelaySource + Send + Sync> = Arc::new(FixedDelay(delay));
    let handle = Monitor::spawn(
        display.provider(),
        announcer,
        delay_source,
        SpeechComposer::new(SpeechProfile::default()),
    )
    .unwrap();
    wait_until("initial snapshot", || display.reads() >= 1);
    (handle, rx)
}

#[test]
fn test_wake_announces_new_output() {
    let display = FakeDisplay::new(&["West of House", ">"]);
    let (handle, rx) = start(&display, 0.0);

    display.show(&["West of House", ">open mailbox", "It is locked.", ">"]);
    handle.wake();

    let said = rx.recv_timeout(PATIENCE).unwrap();
    assert_eq!(said, "Grater open mailbox It is locked.");
    handle.join();
}

#[test]
fn test_nothing_said_without_changes() {
    let display = FakeDisplay::new(&["Quiet room"]);
    let (handle, rx) = start(&display, 0.0);

    handle.wake();
    wait_until("cycle", || display.reads() >= 2);
    handle.join();

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_initial_failure_means_everything_is_new() {
    let display = FakeDisplay::new(&["Opening text"]);
    display.broken.store(true, Ordering::SeqCst);
    let (handle, rx) = start(&display, 0.0);

    display.broken.store(false, Ordering::SeqCst);
    handle.wake();

    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "Opening text");
    handle.join();
}

#[test]
fn test_stop_during_settle_says_nothing() {
    let display = FakeDisplay::new(&["Hall"]);
    let (handle, rx) = start(&display, 1.0);

    display.show(&["Hall", "A troll appears!"]);
    handle.wake();
    std::thread::sleep(Duration::from_millis(50));

    let stopping = Instant::now();
    handle.join();

    assert!(stopping.elapsed() < Duration::from_millis(900));
    assert_eq!(display.reads(), 1, "no snapshot after the initial one");
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_settle_delay_postpones_snapshot() {
    let display = FakeDisplay::new(&["Hall"]);
    let (handle, rx) = start(&display, 0.2);

    display.show(&["Hall", "Dust settles."]);
    let woke = Instant::now();
    handle.wake();

    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "Dust settles.");
    assert!(woke.elapsed() >= Duration::from_millis(200));
    handle.join();
}

#[test]
fn test_provider_failure_does_not_end_loop() {
    let capture = init_test_capture();
    let display = FakeDisplay::new(&["Lab"]);
    let (handle, rx) = start(&display, 0.0);
    let monitor_id = handle.id().as_str().to_string();

    display.broken.store(true, Ordering::SeqCst);
    handle.wake();
    wait_until("failed cycle", || display.reads() >= 2);

    display.broken.store(false, Ordering::SeqCst);
    display.show(&["Lab", "The beaker bubbles."]);
    handle.wake();

    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "The beaker bubbles.");
    assert!(handle.is_running());
    handle.join();

    let mine = |e: &CapturedEvent| {
        e.op.as_deref() == Some("monitor_cycle")
            && e.fields.get(FIELD_MONITOR_ID) == Some(&monitor_id)
    };
    let errors = capture.count_events(|e| mine(e) && e.event.as_deref() == Some(EVENT_END_ERROR));
    let ends = capture.count_events(|e| mine(e) && e.event.as_deref() == Some(EVENT_END));
    assert_eq!(errors, 1);
    assert!(ends >= 1);
}

#[test]
fn test_stop_while_idle_is_prompt() {
    let display = FakeDisplay::new(&["Idle"]);
    let (handle, _rx) = start(&display, 0.0);
    assert!(handle.is_running());

    handle.stop();
    assert!(handle.is_stopping());
    wait_until("monitor exit", || !handle.is_running());
}

#[test]
fn test_independent_monitors_do_not_share_history() {
    let left = FakeDisplay::new(&["Left pane"]);
    let right = FakeDisplay::new(&["Right pane"]);
    let (left_handle, left_rx) = start(&left, 0.0);
    let (right_handle, right_rx) = start(&right, 0.0);

    left.show(&["Left pane", "Left news"]);
    right.show(&["Right pane", "Right news"]);
    left_handle.wake();
    right_handle.wake();

    assert_eq!(left_rx.recv_timeout(PATIENCE).unwrap(), "Left news");
    assert_eq!(right_rx.recv_timeout(PATIENCE).unwrap(), "Right news");
}

#[test]
fn test_provider_panic_does_not_end_loop() {
    let capture = init_test_capture();
    let display = FakeDisplay::new(&["Cellar"]);
    let (handle, rx) = start(&display, 0.0);
    let monitor_id = handle.id().as_str().to_string();

    display.crash_once.store(true, Ordering::SeqCst);
    handle.wake();
    wait_until("crashed cycle", || display.reads() >= 2);

    display.show(&["Cellar", "A grue lurks."]);
    handle.wake();

    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "A grue lurks.");
    assert!(handle.is_running());
    handle.join();

    let internal = capture.count_events(|e| {
        e.op.as_deref() == Some("monitor_cycle")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get(FIELD_MONITOR_ID) == Some(&monitor_id)
            && e.fields.get(FIELD_ERR_CODE).map(String::as_str) == Some("ERR_INTERNAL")
    });
    assert_eq!(internal, 1);
}

#[test]
fn test_announcer_panic_drops_only_that_announcement() {
    let (tx, rx) = mpsc::channel();
    let announcer = move |text: &str| {
        if text.contains("explodes") {
            panic!("speech backend crashed");
        }
        let _ = tx.send(text.to_string());
    };
    let display = FakeDisplay::new(&["Lab"]);
    let (handle, rx) = start_with(&display, 0.0, announcer, rx);

    display.show(&["Lab", "The flask explodes."]);
    handle.wake();
    wait_until("first cycle", || display.reads() >= 2);

    display.show(&["Lab", "The flask explodes.", "Smoke clears."]);
    handle.wake();

    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "Smoke clears.");
    handle.join();
}

#[test]
fn test_snapshot_event_reports_region_sizes() {
    let capture = init_test_capture();
    let display = FakeDisplay::new(&["Attic"]);
    let (handle, rx) = start(&display, 0.0);
    let monitor_id = handle.id().as_str().to_string();

    display.show(&["Attic", "  ", "A bat flutters."]);
    handle.wake();
    assert_eq!(rx.recv_timeout(PATIENCE).unwrap(), "A bat flutters.");
    handle.join();

    let taken: Vec<CapturedEvent> = capture
        .events()
        .into_iter()
        .filter(|e| {
            e.message.as_deref() == Some("snapshot taken")
                && e.fields.get(FIELD_MONITOR_ID) == Some(&monitor_id)
        })
        .collect();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].fields.get(FIELD_MAIN_LINES).map(String::as_str), Some("2"));
    assert_eq!(taken[0].fields.get(FIELD_OTHER_LINES).map(String::as_str), Some("0"));
}
