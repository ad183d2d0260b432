#![forbid(unsafe_code)]

//! Thread-backed repeating poll for native hosts.
//!
//! Browser hosts schedule the poll through the page's own timer primitive;
//! this module is the native equivalent: a background thread that sends
//! [`PageEvent::PollTick`] over a channel every interval. Each firing is a
//! single channel send, so ticks never overlap, and spacing is subject to
//! scheduler jitter exactly like a host timer.
//!
//! The page contract has no cancellation path; the poll runs until the
//! page dies. Natively "the page dies" means the [`PollHandle`] is dropped,
//! which stops the thread so tests and short-lived hosts don't leak it.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use pagewake_core::event::PageEvent;
use tracing::debug;

/// Signal checked by the poll thread between firings.
///
/// Set once, never cleared. Waiting is condvar-based so stopping wakes the
/// thread immediately instead of after the current interval.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        let trigger = StopTrigger { inner };
        (signal, trigger)
    }

    /// Check if the stop signal has been triggered.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap()
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the timeout expired. Loops on
    /// the condvar until one or the other, so spurious wakeups don't cut an
    /// interval short.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap();
        if *stopped {
            return true;
        }

        let start = std::time::Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar.wait_timeout(stopped, remaining).unwrap();
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Trigger side of a [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    /// Signal the poll thread to stop.
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap();
        *stopped = true;
        cvar.notify_all();
    }
}

/// Handle to a running poll thread.
///
/// Dropping the handle stops the thread without joining; [`stop`] stops and
/// joins.
///
/// [`stop`]: PollHandle::stop
pub struct PollHandle {
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl PollHandle {
    /// Stop the poll and join its thread.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.trigger.stop();
        // Don't join in drop to avoid blocking
    }
}

/// Start a poll thread sending [`PageEvent::PollTick`] every `interval`.
///
/// The thread exits when stopped or when the receiver disconnects.
pub fn spawn(interval: Duration, sender: mpsc::Sender<PageEvent>) -> PollHandle {
    let (signal, trigger) = StopSignal::new();
    let thread = thread::spawn(move || {
        let mut tick_count: u64 = 0;
        debug!(?interval, "poll started");
        loop {
            if signal.wait_timeout(interval) {
                debug!(tick_count, "poll stopped");
                break;
            }
            tick_count += 1;
            if sender.send(PageEvent::PollTick).is_err() {
                debug!(tick_count, "poll channel closed");
                break;
            }
        }
    });

    PollHandle {
        trigger,
        thread: Some(thread),
    }
}
