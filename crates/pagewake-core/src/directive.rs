#![forbid(unsafe_code)]

//! Activator effects as plain data.
//!
//! The activator never touches the DOM or the sketch runtime directly; it
//! emits [`Directive`] values that the session executes against injected
//! host capabilities. This keeps the state machine pure and every effect
//! observable in tests.

use std::time::Duration;

/// The literal diagnostic text emitted on every poll firing.
pub const START_MARKER: &str = "start";

/// Fade duration presets for hiding controls.
///
/// The named speeds match the effect library of the page this replaces:
/// `Fast` is 200 ms, `Slow` is 600 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeSpeed {
    /// 200 ms fade.
    Fast,
    /// 600 ms fade.
    Slow,
}

impl FadeSpeed {
    /// Wall-clock duration of the fade.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Fast => Duration::from_millis(200),
            Self::Slow => Duration::from_millis(600),
        }
    }
}

/// One externally visible effect requested by the activator.
///
/// Directives are executed in emission order. Every lookup they imply is
/// performed at execution time and degrades to a no-op on absence; nothing
/// is cached between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Fade out and hide the control element with the given id.
    HideControl {
        /// DOM id of the control element.
        id: String,
        /// Fade duration preset.
        fade: FadeSpeed,
    },

    /// Look up the sketch instance registered under `id` and invoke
    /// whichever optional capabilities it exposes.
    WakeSketch {
        /// Registry id of the sketch instance.
        id: String,
    },

    /// Emit the [`START_MARKER`] diagnostic through the log sink.
    LogMarker,

    /// Force input focus onto the element with the given id.
    FocusElement {
        /// DOM id of the target element.
        id: String,
    },
}
