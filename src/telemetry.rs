//! Tracing subscriber setup and span constructors.

use crate::config::TelemetryConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` wins over `config.filter` when it is set. Returns an error
/// if a global subscriber has already been installed.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
    }
}

/// Standardized span constructors for registry observability.
pub mod spans {
    use tracing::{Span, debug_span, trace_span};

    /// Span covering one notification delivery.
    pub fn notification(core: &str, name: &str, observers: usize) -> Span {
        trace_span!("notify", core = %core, notification = %name, observers = observers)
    }

    /// Span covering one command execution.
    pub fn command(core: &str, notification: &str) -> Span {
        debug_span!("command", core = %core, notification = %notification)
    }

    /// Span covering construction of a core's facade.
    pub fn core(key: &str) -> Span {
        debug_span!("core", key = %key)
    }
}
