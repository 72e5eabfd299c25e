//! Observers: a callback paired with the identity of whoever registered it.

use crate::error::HandlerResult;
use crate::patterns::notification::Notification;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(1);

/// Stable identity used to find an observer again on removal.
///
/// Ids are handed out from a process-wide counter and never reused, so a
/// stale id can never match an unrelated, newer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate a fresh identity.
    pub fn next() -> Self {
        Self(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Callback invoked for each delivered notification.
pub type NotifyFn = Arc<dyn Fn(&Notification) -> HandlerResult + Send + Sync>;

/// A registered `(callback, context)` pair.
///
/// Two observers are "the same registration" when their contexts match;
/// the callbacks are never compared.
#[derive(Clone)]
pub struct Observer {
    notify: NotifyFn,
    context: ContextId,
}

impl Observer {
    pub fn new<F>(notify: F, context: ContextId) -> Self
    where
        F: Fn(&Notification) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            notify: Arc::new(notify),
            context,
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Invoke the callback with `notification`.
    pub fn notify_observer(&self, notification: &Notification) -> HandlerResult {
        (self.notify)(notification)
    }

    /// Whether this observer was registered under `context`.
    pub fn compare_notify_context(&self, context: ContextId) -> bool {
        self.context == context
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
