//! Log output configuration.

use serde::Deserialize;

use super::types::default_true;

/// Log output configuration consumed by [`crate::telemetry::init`].
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// Include the event target (module path) in each line.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            with_target: true,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}
