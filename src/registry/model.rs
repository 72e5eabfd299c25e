//! The data registry: named proxies of one core.

use crate::multicore::Multicore;
use crate::patterns::notifier::Notify;
use crate::patterns::proxy::Proxy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Holds the proxies registered under one core key.
pub struct Model {
    key: String,
    manager: Weak<Multicore>,
    proxies: RwLock<HashMap<String, Arc<dyn Proxy>>>,
}

impl Model {
    pub(crate) fn new(key: &str, manager: Weak<Multicore>) -> Self {
        Self {
            key: key.to_string(),
            manager,
            proxies: RwLock::new(HashMap::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Store `proxy` under its name, bind it to this core and call its
    /// `on_register` hook.
    ///
    /// A proxy with the same name already registered wins; the call is a
    /// no-op and returns `false`. Remove the old proxy first to replace it.
    pub fn register_proxy(&self, proxy: Arc<dyn Proxy>) -> bool {
        {
            let mut proxies = self.proxies.write();
            if proxies.contains_key(proxy.name()) {
                debug!(core = %self.key, proxy = %proxy.name(), "Proxy already registered");
                return false;
            }
            proxy.initialize_notifier(&self.key, &self.manager);
            proxies.insert(proxy.name().to_string(), proxy.clone());
        }

        debug!(core = %self.key, proxy = %proxy.name(), "Proxy registered");
        proxy.on_register();
        true
    }

    pub fn retrieve_proxy(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.proxies.read().get(name).cloned()
    }

    pub fn has_proxy(&self, name: &str) -> bool {
        self.proxies.read().contains_key(name)
    }

    /// Drop the proxy named `name` and call its `on_remove` hook.
    pub fn remove_proxy(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        let proxy = self.proxies.write().remove(name)?;
        debug!(core = %self.key, proxy = %name, "Proxy removed");
        proxy.on_remove();
        Some(proxy)
    }

    pub fn proxy_names(&self) -> Vec<String> {
        self.proxies.read().keys().cloned().collect()
    }
}
