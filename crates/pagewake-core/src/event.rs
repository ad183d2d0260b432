#![forbid(unsafe_code)]

//! Host-dispatched page events.
//!
//! The host environment (browser, native driver, or a test harness) owns
//! event delivery: focus callbacks and poll firings arrive from outside and
//! are fed into [`PageActivator::on_event`]. All events derive `Clone`,
//! `Copy`, `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! [`PageActivator::on_event`]: crate::activator::PageActivator::on_event

/// A host-dispatched page event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEvent {
    /// A canvas element gained input focus.
    ///
    /// Which canvas does not matter: every canvas on the page carries the
    /// same handler, and the reaction targets the configured sketch.
    CanvasFocused,

    /// One firing of the repeating page poll.
    ///
    /// Fired every poll interval for the lifetime of the page. Firings are
    /// subject to host scheduler jitter and never overlap.
    PollTick,
}
