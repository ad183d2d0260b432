#![forbid(unsafe_code)]

//! WASM page bindings for Pagewake.
//!
//! This crate is intentionally host-specific (web/WASM). It binds the
//! host-agnostic session from `pagewake-runtime` to the real page:
//! - focus listeners on every `<canvas>` element,
//! - the repeating `setInterval` poll,
//! - DOM focus/hide effects and the console log sink,
//! - duck-typed capability probes against the sketch runtime's
//!   lookup-by-id API.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{PageWake, activate};

/// Host setup failure.
///
/// The only fallible step on the web path is wiring the page: a host with
/// no window/document cannot hold a session at all, and malformed options
/// are a caller bug worth surfacing. Everything after setup follows the
/// absence-is-a-no-op contract and never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebSetupError {
    /// No global `window` object.
    NoWindow,
    /// `window` exists but has no document.
    NoDocument,
    /// The options string was not valid JSON for the options schema.
    BadOptions(String),
}

impl core::fmt::Display for WebSetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no window object"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::BadOptions(msg) => write!(f, "bad options: {msg}"),
        }
    }
}

impl std::error::Error for WebSetupError {}

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct PageWake;

#[cfg(not(target_arch = "wasm32"))]
impl PageWake {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setup_errors_render_stable_messages() {
        assert_eq!(WebSetupError::NoWindow.to_string(), "no window object");
        assert_eq!(
            WebSetupError::BadOptions("expected value".to_string()).to_string(),
            "bad options: expected value"
        );
    }
}
