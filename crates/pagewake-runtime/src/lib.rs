#![forbid(unsafe_code)]

//! Runtime: page session lifecycle, directive execution, and the poll timer.
//!
//! The session itself is host-driven and suitable for
//! `wasm32-unknown-unknown` (no threads or blocking, no clock reads). The
//! thread-backed poll in [`poll`] and the driver in [`driven`] are for
//! native hosts and tests; browser hosts schedule the poll themselves and
//! call [`PageSession::dispatch`] directly.

pub mod driven;
pub mod poll;
pub mod session;

pub use driven::DrivenSession;
pub use session::PageSession;
