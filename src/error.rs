//! Unified error handling for multicore-mvc.
//!
//! Expected absence (unknown proxy, mediator, command or core) is never an
//! error; lookups return `Option`/`bool`. The types here cover the two
//! remaining failure paths: a collaborator that is not yet bound to a core,
//! and a collaborator that reports a failure while handling a notification.

use thiserror::Error;

// ============================================================================
// Notifier Errors (collaborator binding)
// ============================================================================

/// Errors raised when a collaborator tries to reach its core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    /// The collaborator has not been handed a core key yet.
    #[error("notifier is not bound to a core")]
    Uninitialized,

    /// The core manager that owned this key has been dropped.
    #[error("core manager for key {0} is gone")]
    CoreRemoved(String),
}

impl NotifierError {
    /// Get a static error code string for tracing fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::CoreRemoved(_) => "core_removed",
        }
    }
}

// ============================================================================
// Handler Errors (notification delivery)
// ============================================================================

/// Errors returned by observer callbacks, mediator handlers and commands.
///
/// The first failing observer aborts the current delivery and its error is
/// handed back to whoever sent the notification.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Notifier(#[from] NotifierError),

    #[error("handler failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Shorthand for a collaborator-reported failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Get a static error code string for tracing fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Notifier(e) => e.error_code(),
            Self::Failed(_) => "failed",
            Self::Other(_) => "other",
        }
    }
}

/// Result type for observer callbacks, mediator handlers and commands.
pub type HandlerResult = Result<(), HandlerError>;
