//! The per-core facade: one entry point over model, view and controller.

use crate::error::HandlerResult;
use crate::multicore::Multicore;
use crate::patterns::command::CommandFactory;
use crate::patterns::mediator::Mediator;
use crate::patterns::notification::{Notification, Payload};
use crate::patterns::proxy::Proxy;
use crate::registry::{Controller, Model, View};
use std::sync::Arc;

/// Unified API for one core.
///
/// Facades are only built by [`Multicore`], which guarantees a single
/// facade per key. The facade shares its registries with the manager's
/// tables; removing the core drops them from the manager, not from a
/// facade someone still holds.
pub struct Facade {
    key: String,
    model: Arc<Model>,
    view: Arc<View>,
    controller: Arc<Controller>,
}

impl Facade {
    pub(crate) fn new(key: &str, manager: &Multicore) -> Self {
        let model = manager.model(key);
        let controller = manager.controller(key);
        let view = manager.view(key);
        Self {
            key: key.to_string(),
            model,
            view,
            controller,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn view(&self) -> &Arc<View> {
        &self.view
    }

    pub fn controller(&self) -> &Arc<Controller> {
        &self.controller
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn register_command(&self, name: &str, factory: CommandFactory) {
        self.controller.register_command(name, factory);
    }

    pub fn remove_command(&self, name: &str) {
        self.controller.remove_command(name);
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.controller.has_command(name)
    }

    // ========================================================================
    // Proxies
    // ========================================================================

    pub fn register_proxy(&self, proxy: Arc<dyn Proxy>) -> bool {
        self.model.register_proxy(proxy)
    }

    pub fn retrieve_proxy(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.model.retrieve_proxy(name)
    }

    pub fn remove_proxy(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.model.remove_proxy(name)
    }

    pub fn has_proxy(&self, name: &str) -> bool {
        self.model.has_proxy(name)
    }

    // ========================================================================
    // Mediators
    // ========================================================================

    pub fn register_mediator(&self, mediator: Arc<dyn Mediator>) -> bool {
        self.view.register_mediator(mediator)
    }

    pub fn retrieve_mediator(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.view.retrieve_mediator(name)
    }

    pub fn remove_mediator(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.view.remove_mediator(name)
    }

    pub fn has_mediator(&self, name: &str) -> bool {
        self.view.has_mediator(name)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Build a notification and deliver it to this core's observers.
    pub fn send_notification(&self, name: &str, body: Option<Payload>, kind: Option<&str>) -> HandlerResult {
        let mut notification = Notification::new(name).with_payload(body);
        if let Some(kind) = kind {
            notification = notification.with_kind(kind);
        }
        self.notify_observers(&notification)
    }

    pub fn notify_observers(&self, notification: &Notification) -> HandlerResult {
        self.view.notify_observers(notification)
    }
}
