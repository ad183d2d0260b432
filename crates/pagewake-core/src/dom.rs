#![forbid(unsafe_code)]

//! Injected host capabilities: DOM access and the diagnostic log sink.
//!
//! The session receives these as constructor arguments rather than reaching
//! for ambient globals. Real hosts bind them to the browser; tests and
//! native harnesses use the in-memory recording implementations below.
//!
//! All operations are fire-and-forget. A missing element is a silent no-op:
//! absence is the only failure category in this system and is never an
//! error.

use crate::directive::FadeSpeed;

/// DOM access capability.
pub trait PageDom {
    /// Force input focus onto the element with the given id.
    ///
    /// No-op when no such element exists.
    fn focus_element(&mut self, id: &str);

    /// Fade out and hide the element with the given id.
    ///
    /// No-op when no such element exists.
    fn hide_element(&mut self, id: &str, fade: FadeSpeed);
}

/// Diagnostic log sink capability.
///
/// Carries the page's observable diagnostic output (the browser console in
/// real hosts). Ambient tracing is separate and never routed through this.
pub trait LogSink {
    /// Emit one line of diagnostic text.
    fn log(&mut self, text: &str);
}

/// A recorded DOM action, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomAction {
    /// `focus_element` was called with this id.
    Focused(String),
    /// `hide_element` was called with this id and fade.
    Hidden {
        /// Element id passed to `hide_element`.
        id: String,
        /// Fade preset passed to `hide_element`.
        fade: FadeSpeed,
    },
}

/// In-memory [`PageDom`] that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingDom {
    /// All DOM actions, in call order.
    pub actions: Vec<DomAction>,
}

impl RecordingDom {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageDom for RecordingDom {
    fn focus_element(&mut self, id: &str) {
        self.actions.push(DomAction::Focused(id.to_string()));
    }

    fn hide_element(&mut self, id: &str, fade: FadeSpeed) {
        self.actions.push(DomAction::Hidden {
            id: id.to_string(),
            fade,
        });
    }
}

/// In-memory [`LogSink`] that records every line in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingLog {
    /// All logged lines, in call order.
    pub lines: Vec<String>,
}

impl RecordingLog {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for RecordingLog {
    fn log(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_dom_preserves_call_order() {
        let mut dom = RecordingDom::new();
        dom.hide_element("start-button", FadeSpeed::Fast);
        dom.focus_element("mario-canvas");

        assert_eq!(
            dom.actions,
            vec![
                DomAction::Hidden {
                    id: "start-button".to_string(),
                    fade: FadeSpeed::Fast,
                },
                DomAction::Focused("mario-canvas".to_string()),
            ]
        );
    }

    #[test]
    fn recording_log_preserves_lines() {
        let mut log = RecordingLog::new();
        log.log("start");
        log.log("start");
        assert_eq!(log.lines, vec!["start", "start"]);
    }
}
