//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct and loading (Config, ConfigError)
//! - [`registry`]: Registry behavior knobs (RegistryConfig, InterestTracking)
//! - [`telemetry`]: Log output configuration (TelemetryConfig)

mod registry;
mod telemetry;
mod types;

pub use registry::{InterestTracking, RegistryConfig};
pub use telemetry::TelemetryConfig;
pub use types::{Config, ConfigError};
