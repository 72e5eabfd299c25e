//! The notification registry: observer lists and mediators of one core.
//!
//! Lock order is always mediators before observers. Notification delivery
//! copies the observer list for a name under a read lock and releases it
//! before invoking any callback, so callbacks may register or remove
//! observers and mediators (including themselves) without deadlocking. Such
//! changes only take effect for the next delivery.

use crate::config::InterestTracking;
use crate::error::HandlerResult;
use crate::multicore::Multicore;
use crate::patterns::mediator::Mediator;
use crate::patterns::notification::Notification;
use crate::patterns::notifier::Notify;
use crate::patterns::observer::{ContextId, Observer};
use crate::telemetry::spans;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

struct MediatorEntry {
    mediator: Arc<dyn Mediator>,
    context: ContextId,
    /// Interests as declared at registration time.
    interests: Vec<String>,
}

/// Routes notifications to observers and owns the mediators of one core.
pub struct View {
    key: String,
    manager: Weak<Multicore>,
    interest_tracking: InterestTracking,
    observers: RwLock<HashMap<String, Vec<Observer>>>,
    mediators: RwLock<HashMap<String, MediatorEntry>>,
}

impl View {
    pub(crate) fn new(key: &str, manager: Weak<Multicore>, interest_tracking: InterestTracking) -> Self {
        Self {
            key: key.to_string(),
            manager,
            interest_tracking,
            observers: RwLock::new(HashMap::new()),
            mediators: RwLock::new(HashMap::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Append `observer` to the list for `name`. No deduplication.
    pub fn register_observer(&self, name: &str, observer: Observer) {
        trace!(core = %self.key, notification = %name, context = %observer.context(), "Observer registered");
        self.observers
            .write()
            .entry(name.to_string())
            .or_default()
            .push(observer);
    }

    /// Deliver `notification` to every observer registered for its name, in
    /// registration order, as of the moment this call starts.
    ///
    /// The first observer error aborts the delivery and is returned.
    pub fn notify_observers(&self, notification: &Notification) -> HandlerResult {
        let observers: Vec<Observer> = self
            .observers
            .read()
            .get(notification.name())
            .cloned()
            .unwrap_or_default();

        let span = spans::notification(&self.key, notification.name(), observers.len());
        let _enter = span.enter();

        for observer in &observers {
            if let Err(e) = observer.notify_observer(notification) {
                debug!(
                    core = %self.key,
                    notification = %notification.name(),
                    context = %observer.context(),
                    error = %e,
                    code = e.error_code(),
                    "Observer failed, delivery aborted"
                );
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove the observer registered under `context` from the list for
    /// `name`. A list that becomes empty is dropped entirely.
    pub fn remove_observer(&self, name: &str, context: ContextId) {
        let mut observers = self.observers.write();
        let Some(list) = observers.get_mut(name) else {
            return;
        };

        // At most one observer per context in a given list.
        if let Some(pos) = list.iter().position(|o| o.compare_notify_context(context)) {
            list.remove(pos);
            trace!(core = %self.key, notification = %name, context = %context, "Observer removed");
        }

        if list.is_empty() {
            observers.remove(name);
        }
    }

    /// Number of observers currently registered for `name`.
    pub fn observer_count(&self, name: &str) -> usize {
        self.observers.read().get(name).map_or(0, Vec::len)
    }

    // ========================================================================
    // Mediators
    // ========================================================================

    /// Register `mediator` and subscribe it to its declared interests.
    ///
    /// A mediator with the same name already registered wins; the call is a
    /// no-op and returns `false`. Otherwise the mediator is bound to this
    /// core, stored, subscribed through one shared observer, and finally its
    /// `on_register` hook runs with no registry lock held.
    pub fn register_mediator(&self, mediator: Arc<dyn Mediator>) -> bool {
        let name = mediator.name().to_string();
        {
            let mut mediators = self.mediators.write();
            if mediators.contains_key(&name) {
                debug!(core = %self.key, mediator = %name, "Mediator already registered");
                return false;
            }

            mediator.initialize_notifier(&self.key, &self.manager);

            let context = ContextId::next();
            let interests = mediator.notification_interests();
            mediators.insert(
                name.clone(),
                MediatorEntry {
                    mediator: mediator.clone(),
                    context,
                    interests: interests.clone(),
                },
            );

            if !interests.is_empty() {
                let handler = mediator.clone();
                let observer = Observer::new(move |note| handler.handle_notification(note), context);
                for interest in &interests {
                    self.register_observer(interest, observer.clone());
                }
            }

            debug!(core = %self.key, mediator = %name, interests = interests.len(), "Mediator registered");
        }

        mediator.on_register();
        true
    }

    pub fn retrieve_mediator(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.mediators.read().get(name).map(|e| e.mediator.clone())
    }

    pub fn has_mediator(&self, name: &str) -> bool {
        self.mediators.read().contains_key(name)
    }

    /// Unsubscribe and drop the mediator named `name`, then call its
    /// `on_remove` hook with no registry lock held.
    ///
    /// Which subscriptions are removed depends on [`InterestTracking`]:
    /// the interests recorded at registration, or whatever the mediator
    /// declares right now.
    pub fn remove_mediator(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        let entry = {
            let mut mediators = self.mediators.write();
            let entry = mediators.remove(name)?;

            let interests = match self.interest_tracking {
                InterestTracking::Cached => entry.interests.clone(),
                InterestTracking::Requery => entry.mediator.notification_interests(),
            };
            for interest in &interests {
                self.remove_observer(interest, entry.context);
            }
            entry
        };

        debug!(core = %self.key, mediator = %name, "Mediator removed");
        entry.mediator.on_remove();
        Some(entry.mediator)
    }

    pub fn mediator_names(&self) -> Vec<String> {
        self.mediators.read().keys().cloned().collect()
    }
}
