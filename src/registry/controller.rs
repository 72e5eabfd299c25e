//! The command binder: notification name to command factory, per core.

use crate::error::HandlerResult;
use crate::multicore::Multicore;
use crate::patterns::command::CommandFactory;
use crate::patterns::notification::Notification;
use crate::patterns::notifier::Notify;
use crate::patterns::observer::{ContextId, Observer};
use crate::registry::view::View;
use crate::telemetry::spans;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Binds notification names to command factories for one core.
///
/// The controller subscribes itself to its view exactly once per bound
/// name, so rebinding a name swaps the factory without ever creating a
/// second observer.
pub struct Controller {
    key: String,
    manager: Weak<Multicore>,
    view: Arc<View>,
    commands: RwLock<HashMap<String, CommandFactory>>,
    context: ContextId,
    this: Weak<Controller>,
}

impl Controller {
    pub(crate) fn new(key: &str, manager: Weak<Multicore>, view: Arc<View>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            key: key.to_string(),
            manager,
            view,
            commands: RwLock::new(HashMap::new()),
            context: ContextId::next(),
            this: this.clone(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Bind `name` to `factory`, replacing any previous binding.
    pub fn register_command(&self, name: &str, factory: CommandFactory) {
        let mut commands = self.commands.write();
        if !commands.contains_key(name) {
            let this = self.this.clone();
            self.view.register_observer(
                name,
                Observer::new(
                    move |note| match this.upgrade() {
                        Some(controller) => controller.execute_command(note),
                        None => Ok(()),
                    },
                    self.context,
                ),
            );
        }

        if commands.insert(name.to_string(), factory).is_some() {
            debug!(core = %self.key, notification = %name, "Command replaced");
        } else {
            debug!(core = %self.key, notification = %name, "Command registered");
        }
    }

    /// Build a fresh command for `notification` and execute it.
    ///
    /// A missing binding is not an error: the command may have been removed
    /// after the view took its snapshot of observers.
    pub fn execute_command(&self, notification: &Notification) -> HandlerResult {
        let factory = self.commands.read().get(notification.name()).cloned();
        let Some(factory) = factory else {
            trace!(core = %self.key, notification = %notification.name(), "No command bound, skipping");
            return Ok(());
        };

        let mut command = factory();
        command.initialize_notifier(&self.key, &self.manager);

        let span = spans::command(&self.key, notification.name());
        let _enter = span.enter();
        command.execute(notification)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.read().contains_key(name)
    }

    /// Unbind `name` and unsubscribe from the view. Unknown names are a no-op.
    pub fn remove_command(&self, name: &str) {
        let mut commands = self.commands.write();
        if commands.contains_key(name) {
            self.view.remove_observer(name, self.context);
            commands.remove(name);
            debug!(core = %self.key, notification = %name, "Command removed");
        }
    }

    pub fn command_names(&self) -> Vec<String> {
        self.commands.read().keys().cloned().collect()
    }
}
