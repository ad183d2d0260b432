#![forbid(unsafe_code)]

//! The page activator state machine.
//!
//! One activator exists per page session. It maps host events to
//! [`Directive`] lists and performs no I/O itself; the session executes the
//! directives against injected capabilities.
//!
//! # Design Notes
//!
//! - Directives are emitted in execution order: on focus the control hide
//!   precedes the sketch wake, on poll the log marker precedes the focus
//!   request.
//! - The activator caches nothing between events. Every absence check
//!   happens at directive execution time and is re-evaluated from scratch
//!   on the next event.

use std::time::Duration;

use crate::directive::{Directive, FadeSpeed};
use crate::event::PageEvent;

/// Default registry/DOM id of the sketch and its canvas.
pub const DEFAULT_SKETCH_ID: &str = "mario-canvas";

/// Default DOM id of the start control.
pub const DEFAULT_START_CONTROL_ID: &str = "start-button";

/// Default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration for a page activator.
///
/// The identifiers are load-bearing: they must match the hosting page
/// exactly or every lookup degrades to a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatorConfig {
    /// Identifier of the sketch instance and its canvas element.
    pub sketch_id: String,
    /// DOM id of the start control hidden on first focus.
    pub start_control_id: String,
    /// Interval of the repeating page poll.
    pub poll_interval: Duration,
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            sketch_id: DEFAULT_SKETCH_ID.to_string(),
            start_control_id: DEFAULT_START_CONTROL_ID.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Maps page events to directives.
#[derive(Debug, Clone, Default)]
pub struct PageActivator {
    config: ActivatorConfig,
}

impl PageActivator {
    /// Create an activator with the given configuration.
    #[must_use]
    pub fn new(config: ActivatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ActivatorConfig {
        &self.config
    }

    /// React to one host event.
    ///
    /// Directives must be executed in the returned order.
    pub fn on_event(&mut self, event: PageEvent) -> Vec<Directive> {
        crate::trace!(?event, "activator event");
        match event {
            PageEvent::CanvasFocused => vec![
                Directive::HideControl {
                    id: self.config.start_control_id.clone(),
                    fade: FadeSpeed::Fast,
                },
                Directive::WakeSketch {
                    id: self.config.sketch_id.clone(),
                },
            ],
            PageEvent::PollTick => vec![
                Directive::LogMarker,
                Directive::FocusElement {
                    id: self.config.sketch_id.clone(),
                },
            ],
        }
    }
}
