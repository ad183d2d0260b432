#![forbid(unsafe_code)]

//! Sketch instances and capability probing.
//!
//! The embedded animation ("sketch") is owned by an external runtime and
//! looked up by a fixed identifier at event time. Instances expose an open
//! set of optional capabilities; [`wake`] probes for the ones it knows
//! about and invokes only those that are present.
//!
//! # Fail-Open Guarantee
//!
//! Every absence degrades to a no-op: a registry miss (sketch not yet
//! initialized) makes no calls, and a missing capability is skipped. No
//! outcome is cached; the next event probes from scratch.

use bitflags::bitflags;

bitflags! {
    /// Optional capabilities a sketch instance may expose.
    ///
    /// Capabilities gate invocation: [`wake`] only calls the methods whose
    /// flag is present, regardless of what the trait impl provides.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SketchCaps: u8 {
        /// The instance can resume its draw loop.
        const LOOP   = 0b01;
        /// The instance can unmute its audio.
        const UNMUTE = 0b10;
    }
}

/// A running sketch instance.
///
/// Both capability methods default to no-ops so implementations only
/// override what they actually support.
pub trait SketchInstance {
    /// Which optional capabilities this instance exposes.
    fn caps(&self) -> SketchCaps;

    /// Resume the draw loop. Only invoked when [`SketchCaps::LOOP`] is set.
    fn resume_loop(&mut self) {}

    /// Unmute audio. Only invoked when [`SketchCaps::UNMUTE`] is set.
    fn unmute(&mut self) {}
}

/// Lookup of sketch instances by identifier.
///
/// Returns `None` while the sketch has not initialized yet. The borrow is
/// valid for a single handler invocation only; callers hold no reference
/// across events.
pub trait SketchRegistry {
    /// Look up the instance registered under `id`.
    fn lookup(&mut self, id: &str) -> Option<&mut dyn SketchInstance>;
}

/// What [`wake`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOutcome {
    /// The registry had no instance under the requested id.
    NotFound,
    /// An instance was found; the flags record which capabilities ran.
    Woken {
        /// `resume_loop` was invoked.
        looped: bool,
        /// `unmute` was invoked.
        unmuted: bool,
    },
}

/// Probe the instance registered under `id` and invoke its present
/// capabilities.
///
/// A registry miss is not an error; it returns [`WakeOutcome::NotFound`]
/// without making any calls.
pub fn wake(registry: &mut dyn SketchRegistry, id: &str) -> WakeOutcome {
    let Some(instance) = registry.lookup(id) else {
        return WakeOutcome::NotFound;
    };

    let caps = instance.caps();
    let looped = caps.contains(SketchCaps::LOOP);
    if looped {
        instance.resume_loop();
    }
    let unmuted = caps.contains(SketchCaps::UNMUTE);
    if unmuted {
        instance.unmute();
    }

    crate::debug!(id, looped, unmuted, "sketch woken");
    WakeOutcome::Woken { looped, unmuted }
}

/// Single-slot registry for tests and native harnesses.
///
/// Holds at most one instance under a fixed id. `set` replaces the slot;
/// an empty slot models a sketch that has not initialized yet.
#[derive(Debug, Default)]
pub struct StaticRegistry<S> {
    id: String,
    instance: Option<S>,
}

impl<S: SketchInstance> StaticRegistry<S> {
    /// Create an empty registry that will serve lookups for `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instance: None,
        }
    }

    /// Register the instance, replacing any previous one.
    pub fn set(&mut self, instance: S) {
        self.instance = Some(instance);
    }

    /// Remove the instance, returning it if present.
    pub fn clear(&mut self) -> Option<S> {
        self.instance.take()
    }

    /// Shared access to the registered instance.
    #[must_use]
    pub fn instance(&self) -> Option<&S> {
        self.instance.as_ref()
    }
}

impl<S: SketchInstance> SketchRegistry for StaticRegistry<S> {
    fn lookup(&mut self, id: &str) -> Option<&mut dyn SketchInstance> {
        if id != self.id {
            return None;
        }
        self.instance
            .as_mut()
            .map(|s| s as &mut dyn SketchInstance)
    }
}
