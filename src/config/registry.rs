//! Registry behavior configuration.

use serde::Deserialize;

/// How a view remembers which notifications a mediator is observing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestTracking {
    /// Snapshot interests when the mediator is registered and remove
    /// exactly those observers on removal.
    #[default]
    Cached,
    /// Ask the live mediator for its interests again on removal. A mediator
    /// whose interests changed in between leaves orphaned observers behind.
    Requery,
}

/// Registry configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RegistryConfig {
    /// Mediator interest bookkeeping (default: cached).
    #[serde(default)]
    pub interest_tracking: InterestTracking,
}
