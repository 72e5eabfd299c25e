//! Mediators: bridges between a view component and notifications.

use crate::error::HandlerResult;
use crate::patterns::notification::{Notification, Payload};
use crate::patterns::notifier::{Notifier, Notify};
use parking_lot::RwLock;

/// Default mediator name.
pub const MEDIATOR_NAME: &str = "Mediator";

/// A named bridge registered with a [`crate::View`].
///
/// The view asks [`Mediator::notification_interests`] once on registration
/// and routes each of those notifications to
/// [`Mediator::handle_notification`] until the mediator is removed.
pub trait Mediator: Notify + Send + Sync {
    fn base(&self) -> &MediatorBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Opaque payload; never interpreted by the framework.
    fn view_component(&self) -> Option<Payload> {
        self.base().view_component()
    }

    fn set_view_component(&self, component: Option<Payload>) {
        self.base().set_view_component(component);
    }

    /// Names of the notifications this mediator wants delivered.
    fn notification_interests(&self) -> Vec<String> {
        Vec::new()
    }

    fn handle_notification(&self, _notification: &Notification) -> HandlerResult {
        Ok(())
    }

    /// Called by the view after storage and observer registration.
    fn on_register(&self) {}

    /// Called by the view after the mediator's observers are gone.
    fn on_remove(&self) {}
}

/// Name, view component and notifier shared by mediator implementations.
pub struct MediatorBase {
    name: String,
    view_component: RwLock<Option<Payload>>,
    notifier: Notifier,
}

impl MediatorBase {
    /// `None` falls back to [`MEDIATOR_NAME`].
    pub fn new(name: Option<&str>, view_component: Option<Payload>) -> Self {
        Self {
            name: name.unwrap_or(MEDIATOR_NAME).to_string(),
            view_component: RwLock::new(view_component),
            notifier: Notifier::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view_component(&self) -> Option<Payload> {
        self.view_component.read().clone()
    }

    pub fn set_view_component(&self, component: Option<Payload>) {
        *self.view_component.write() = component;
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl Notify for MediatorBase {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

/// A bare `MediatorBase` has no interests and ignores everything.
impl Mediator for MediatorBase {
    fn base(&self) -> &MediatorBase {
        self
    }
}
