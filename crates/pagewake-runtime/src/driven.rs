#![forbid(unsafe_code)]

//! Native session driver.
//!
//! [`DrivenSession`] pairs a [`PageSession`] with the thread-backed poll
//! from [`crate::poll`]. Construction is the native analog of the page
//! ready event: it starts exactly one poll timer, and no path ever starts
//! a second one for the same session.
//!
//! The driver is pull-based: ticks queue on a channel and [`pump`] drains
//! them into the session on the caller's thread, so the session is only
//! ever touched from one thread and needs no locking.
//!
//! [`pump`]: DrivenSession::pump

use std::sync::mpsc;

use pagewake_core::dom::{LogSink, PageDom};
use pagewake_core::event::PageEvent;
use pagewake_core::sketch::SketchRegistry;
use tracing::debug;

use crate::poll::{self, PollHandle};
use crate::session::PageSession;

/// A page session driven by the native poll timer.
pub struct DrivenSession<D, R, L>
where
    D: PageDom,
    R: SketchRegistry,
    L: LogSink,
{
    session: PageSession<D, R, L>,
    events: mpsc::Receiver<PageEvent>,
    _poll: PollHandle,
}

impl<D, R, L> DrivenSession<D, R, L>
where
    D: PageDom,
    R: SketchRegistry,
    L: LogSink,
{
    /// Start driving the session.
    ///
    /// Reads the poll interval from the session's configuration and starts
    /// the single poll timer. The timer stops when the driver is dropped.
    #[must_use]
    pub fn start(session: PageSession<D, R, L>) -> Self {
        let interval = session.config().poll_interval;
        let (sender, events) = mpsc::channel();
        let poll = poll::spawn(interval, sender);
        debug!(?interval, "session driver started");
        Self {
            session,
            events,
            _poll: poll,
        }
    }

    /// Dispatch a host-originated event immediately.
    ///
    /// Used for events the poll doesn't produce, such as a canvas gaining
    /// focus.
    pub fn inject(&mut self, event: PageEvent) {
        self.session.dispatch(event);
    }

    /// Drain queued poll ticks into the session.
    ///
    /// Returns the number of events dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        while let Ok(event) = self.events.try_recv() {
            self.session.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }

    /// Shared access to the driven session.
    #[must_use]
    pub fn session(&self) -> &PageSession<D, R, L> {
        &self.session
    }

    /// Exclusive access to the driven session.
    pub fn session_mut(&mut self) -> &mut PageSession<D, R, L> {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewake_core::activator::ActivatorConfig;
    use pagewake_core::dom::{DomAction, RecordingDom, RecordingLog};
    use pagewake_core::sketch::{SketchCaps, SketchInstance, StaticRegistry};
    use pretty_assertions::assert_eq;
    use std::thread;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct ProbeSketch {
        caps: SketchCaps,
        loop_calls: u32,
    }

    impl SketchInstance for ProbeSketch {
        fn caps(&self) -> SketchCaps {
            self.caps
        }

        fn resume_loop(&mut self) {
            self.loop_calls += 1;
        }
    }

    fn config(interval: Duration) -> ActivatorConfig {
        ActivatorConfig {
            poll_interval: interval,
            ..ActivatorConfig::default()
        }
    }

    fn start(interval: Duration) -> DrivenSession<RecordingDom, StaticRegistry<ProbeSketch>, RecordingLog> {
        DrivenSession::start(PageSession::new(
            config(interval),
            RecordingDom::new(),
            StaticRegistry::new("mario-canvas"),
            RecordingLog::new(),
        ))
    }

    #[test]
    fn ticks_produce_marker_and_focus_pairs() {
        let mut driver = start(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(50));

        let dispatched = driver.pump();
        assert!(dispatched >= 1, "expected at least one tick");

        let session = driver.session();
        assert_eq!(session.log().lines.len(), dispatched);
        assert!(session.log().lines.iter().all(|l| l == "start"));
        assert_eq!(session.dom().actions.len(), dispatched);
        assert!(
            session
                .dom()
                .actions
                .iter()
                .all(|a| *a == DomAction::Focused("mario-canvas".to_string()))
        );
    }

    #[test]
    fn tick_rate_tracks_configured_interval() {
        let mut driver = start(Duration::from_millis(40));
        thread::sleep(Duration::from_millis(150));

        let dispatched = driver.pump();
        // Approximately 3 ticks at 40ms over 150ms, with scheduler tolerance.
        assert!(dispatched >= 2, "expected at least 2 ticks, got {dispatched}");
        assert!(dispatched <= 5, "expected at most 5 ticks, got {dispatched}");
    }

    #[test]
    fn injected_focus_runs_between_ticks() {
        let mut driver = start(Duration::from_millis(500));
        driver.session_mut().registry_mut().set(ProbeSketch {
            caps: SketchCaps::LOOP,
            ..ProbeSketch::default()
        });

        driver.inject(PageEvent::CanvasFocused);

        let sketch = driver.session_mut().registry_mut().clear().unwrap();
        assert_eq!(sketch.loop_calls, 1);
    }

    #[test]
    fn dropping_the_driver_stops_the_poll() {
        let driver = start(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        drop(driver);
        // Nothing to assert beyond "no panic, no hang": the handle's drop
        // stops the timer thread and the channel ends with the driver.
    }

    #[test]
    fn pump_on_quiet_channel_returns_zero() {
        let mut driver = start(Duration::from_millis(500));
        assert_eq!(driver.pump(), 0);
    }
}
