#![forbid(unsafe_code)]

//! JS-facing options schema.
//!
//! `PageWake` accepts an optional JSON string so hosting pages can override
//! the identifiers and the poll interval without a rebuild. Missing fields
//! fall back to the page defaults; a missing or empty string means "all
//! defaults".

use std::time::Duration;

use pagewake_core::activator::{
    ActivatorConfig, DEFAULT_POLL_INTERVAL, DEFAULT_SKETCH_ID, DEFAULT_START_CONTROL_ID,
};
use serde::Deserialize;

/// Options accepted by the `PageWake` constructor, as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageWakeOptions {
    /// Identifier of the sketch instance and its canvas element.
    pub sketch_id: String,
    /// DOM id of the start control hidden on first focus.
    pub start_control_id: String,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for PageWakeOptions {
    fn default() -> Self {
        Self {
            sketch_id: DEFAULT_SKETCH_ID.to_string(),
            start_control_id: DEFAULT_START_CONTROL_ID.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl PageWakeOptions {
    /// Parse an optional JSON options string.
    ///
    /// `None` and blank strings yield the defaults.
    pub fn parse(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
            _ => Ok(Self::default()),
        }
    }

    /// Convert into the activator configuration.
    #[must_use]
    pub fn into_config(self) -> ActivatorConfig {
        ActivatorConfig {
            sketch_id: self.sketch_id,
            start_control_id: self.start_control_id,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
