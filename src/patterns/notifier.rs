//! Binding between a collaborator and the core it belongs to.
//!
//! Commands, mediators and proxies cannot reach their facade from their
//! constructors: the key is handed to them when they are registered with a
//! model or view, or when a controller executes them. Until then every call
//! that needs the facade fails with [`NotifierError::Uninitialized`].

use crate::error::{HandlerResult, NotifierError};
use crate::multicore::Multicore;
use crate::patterns::facade::Facade;
use crate::patterns::notification::{Notification, Payload};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

#[derive(Clone)]
struct Binding {
    key: String,
    manager: Weak<Multicore>,
}

/// Holds the core key of a collaborator once it has been assigned.
#[derive(Default)]
pub struct Notifier {
    binding: RwLock<Option<Binding>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `key` inside `manager`. Rebinding replaces the old key.
    pub fn initialize(&self, key: &str, manager: &Weak<Multicore>) {
        *self.binding.write() = Some(Binding {
            key: key.to_string(),
            manager: manager.clone(),
        });
    }

    pub fn key(&self) -> Option<String> {
        self.binding.read().as_ref().map(|b| b.key.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.binding.read().is_some()
    }

    /// Resolve the facade for the bound key, creating it if the core is new.
    pub fn facade(&self) -> Result<Arc<Facade>, NotifierError> {
        let binding = self
            .binding
            .read()
            .clone()
            .ok_or(NotifierError::Uninitialized)?;
        let manager = binding
            .manager
            .upgrade()
            .ok_or_else(|| NotifierError::CoreRemoved(binding.key.clone()))?;
        Ok(manager.facade(&binding.key))
    }

    /// Build a notification and deliver it through the bound facade.
    pub fn send_notification(
        &self,
        name: &str,
        body: Option<Payload>,
        kind: Option<&str>,
    ) -> HandlerResult {
        let mut notification = Notification::new(name).with_payload(body);
        if let Some(kind) = kind {
            notification = notification.with_kind(kind);
        }
        self.facade()?.notify_observers(&notification)
    }

    /// Copy this binding onto `other`. No-op while unbound.
    pub fn share_binding(&self, other: &Notifier) {
        if let Some(binding) = self.binding.read().clone() {
            other.initialize(&binding.key, &binding.manager);
        }
    }
}

/// Capability shared by every collaborator that can send notifications.
pub trait Notify {
    fn notifier(&self) -> &Notifier;

    fn initialize_notifier(&self, key: &str, manager: &Weak<Multicore>) {
        self.notifier().initialize(key, manager);
    }

    /// The core key, once assigned.
    fn multiton_key(&self) -> Option<String> {
        self.notifier().key()
    }

    fn facade(&self) -> Result<Arc<Facade>, NotifierError> {
        self.notifier().facade()
    }

    fn send_notification(&self, name: &str, body: Option<Payload>, kind: Option<&str>) -> HandlerResult {
        self.notifier().send_notification(name, body, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;

    #[test]
    fn uninitialized_notifier_fails_predictably() {
        let notifier = Notifier::new();
        assert!(!notifier.is_initialized());
        assert_eq!(notifier.key(), None);
        assert!(matches!(notifier.facade(), Err(NotifierError::Uninitialized)));
        assert!(matches!(
            notifier.send_notification("n", None, None),
            Err(HandlerError::Notifier(NotifierError::Uninitialized))
        ));
    }

    #[test]
    fn dropped_manager_reports_core_removed() {
        let notifier = Notifier::new();
        {
            let manager = Multicore::new();
            notifier.initialize("gone", &Arc::downgrade(&manager));
        }
        assert_eq!(notifier.key().as_deref(), Some("gone"));
        assert_eq!(
            notifier.facade().err(),
            Some(NotifierError::CoreRemoved("gone".to_string()))
        );
    }

    #[test]
    fn initialized_notifier_resolves_its_facade() {
        let manager = Multicore::new();
        let notifier = Notifier::new();
        notifier.initialize("notifierKey", &Arc::downgrade(&manager));

        let facade = notifier.facade().unwrap();
        assert_eq!(facade.key(), "notifierKey");
        assert!(Arc::ptr_eq(&facade, &manager.facade("notifierKey")));
    }

    #[test]
    fn share_binding_copies_key() {
        let manager = Multicore::new();
        let source = Notifier::new();
        let target = Notifier::new();

        source.share_binding(&target);
        assert!(!target.is_initialized());

        source.initialize("shared", &Arc::downgrade(&manager));
        source.share_binding(&target);
        assert_eq!(target.key().as_deref(), Some("shared"));
    }
}
