#![forbid(unsafe_code)]

//! The page session: one activator plus the capabilities it acts through.
//!
//! A session is constructed once per page load, when the page structure has
//! finished loading. It owns no timers itself; the host (browser interval,
//! [`DrivenSession`], or a test) feeds events in through [`dispatch`] and
//! each call runs to completion before the next. There is no teardown
//! beyond `Drop`; page unload reclaims everything.
//!
//! [`DrivenSession`]: crate::driven::DrivenSession
//! [`dispatch`]: PageSession::dispatch

use pagewake_core::activator::{ActivatorConfig, PageActivator};
use pagewake_core::directive::{Directive, START_MARKER};
use pagewake_core::dom::{LogSink, PageDom};
use pagewake_core::event::PageEvent;
use pagewake_core::sketch::{self, SketchRegistry};
use tracing::debug;

/// A live page session.
///
/// Capabilities are injected at construction; the session reaches for no
/// ambient globals.
pub struct PageSession<D, R, L>
where
    D: PageDom,
    R: SketchRegistry,
    L: LogSink,
{
    activator: PageActivator,
    dom: D,
    registry: R,
    log: L,
}

impl<D, R, L> PageSession<D, R, L>
where
    D: PageDom,
    R: SketchRegistry,
    L: LogSink,
{
    /// Create a session for the given configuration and host capabilities.
    #[must_use]
    pub fn new(config: ActivatorConfig, dom: D, registry: R, log: L) -> Self {
        Self {
            activator: PageActivator::new(config),
            dom,
            registry,
            log,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ActivatorConfig {
        self.activator.config()
    }

    /// Shared access to the DOM capability.
    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Exclusive access to the DOM capability.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Shared access to the log sink.
    #[must_use]
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Exclusive access to the sketch registry.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Feed one event through the activator and execute the resulting
    /// directives in order.
    ///
    /// This is the host-driven entry point: browser hosts call it from
    /// focus listeners and interval callbacks.
    pub fn dispatch(&mut self, event: PageEvent) {
        debug!(?event, "dispatch");
        for directive in self.activator.on_event(event) {
            self.execute(directive);
        }
    }

    fn execute(&mut self, directive: Directive) {
        match directive {
            Directive::HideControl { id, fade } => self.dom.hide_element(&id, fade),
            Directive::WakeSketch { id } => {
                let outcome = sketch::wake(&mut self.registry, &id);
                debug!(?outcome, "wake executed");
            }
            Directive::LogMarker => self.log.log(START_MARKER),
            Directive::FocusElement { id } => self.dom.focus_element(&id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewake_core::directive::FadeSpeed;
    use pagewake_core::dom::{DomAction, RecordingDom, RecordingLog};
    use pagewake_core::sketch::{SketchCaps, SketchInstance, StaticRegistry};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct ProbeSketch {
        caps: SketchCaps,
        loop_calls: u32,
        unmute_calls: u32,
    }

    impl SketchInstance for ProbeSketch {
        fn caps(&self) -> SketchCaps {
            self.caps
        }

        fn resume_loop(&mut self) {
            self.loop_calls += 1;
        }

        fn unmute(&mut self) {
            self.unmute_calls += 1;
        }
    }

    fn session() -> PageSession<RecordingDom, StaticRegistry<ProbeSketch>, RecordingLog> {
        PageSession::new(
            ActivatorConfig::default(),
            RecordingDom::new(),
            StaticRegistry::new("mario-canvas"),
            RecordingLog::new(),
        )
    }

    #[test]
    fn poll_tick_logs_marker_and_focuses_canvas() {
        let mut session = session();
        session.dispatch(PageEvent::PollTick);

        assert_eq!(session.log().lines, vec!["start"]);
        assert_eq!(
            session.dom().actions,
            vec![DomAction::Focused("mario-canvas".to_string())]
        );
    }

    #[test]
    fn every_tick_repeats_the_same_observable_effects() {
        let mut session = session();
        for _ in 0..3 {
            session.dispatch(PageEvent::PollTick);
        }

        assert_eq!(session.log().lines, vec!["start", "start", "start"]);
        assert_eq!(session.dom().actions.len(), 3);
    }

    #[test]
    fn canvas_focus_hides_start_control_then_wakes_sketch() {
        let mut session = session();
        session.registry_mut().set(ProbeSketch {
            caps: SketchCaps::LOOP | SketchCaps::UNMUTE,
            ..ProbeSketch::default()
        });

        session.dispatch(PageEvent::CanvasFocused);

        assert_eq!(
            session.dom().actions,
            vec![DomAction::Hidden {
                id: "start-button".to_string(),
                fade: FadeSpeed::Fast,
            }]
        );
        let sketch = session.registry_mut().clear().unwrap();
        assert_eq!(sketch.loop_calls, 1);
        assert_eq!(sketch.unmute_calls, 1);
    }

    #[test]
    fn canvas_focus_with_uninitialized_sketch_still_hides_control() {
        // The sketch lookup yielding nothing degrades to a no-op; the hide
        // already happened and nothing errors.
        let mut session = session();
        session.dispatch(PageEvent::CanvasFocused);

        assert_eq!(
            session.dom().actions,
            vec![DomAction::Hidden {
                id: "start-button".to_string(),
                fade: FadeSpeed::Fast,
            }]
        );
        assert!(session.log().lines.is_empty());
    }

    #[test]
    fn partial_caps_invoke_only_whats_present() {
        let mut session = session();
        session.registry_mut().set(ProbeSketch {
            caps: SketchCaps::LOOP,
            ..ProbeSketch::default()
        });

        session.dispatch(PageEvent::CanvasFocused);

        let sketch = session.registry_mut().clear().unwrap();
        assert_eq!(sketch.loop_calls, 1);
        assert_eq!(sketch.unmute_calls, 0);
    }

    #[test]
    fn absence_is_reprobed_on_every_event() {
        let mut session = session();

        // First focus: nothing registered.
        session.dispatch(PageEvent::CanvasFocused);

        // Sketch initializes later; the next focus finds it.
        session.registry_mut().set(ProbeSketch {
            caps: SketchCaps::LOOP,
            ..ProbeSketch::default()
        });
        session.dispatch(PageEvent::CanvasFocused);

        let sketch = session.registry_mut().clear().unwrap();
        assert_eq!(sketch.loop_calls, 1);
    }
}
