//! Proxies: named holders of model data.

use crate::patterns::notification::Payload;
use crate::patterns::notifier::{Notifier, Notify};
use parking_lot::RwLock;

/// Default proxy name.
pub const PROXY_NAME: &str = "Proxy";

/// A named piece of model data registered with a [`crate::Model`].
///
/// Implementors usually embed a [`ProxyBase`] and return it from
/// [`Proxy::base`]; every other method then has a working default.
pub trait Proxy: Notify + Send + Sync {
    fn base(&self) -> &ProxyBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn data(&self) -> Option<Payload> {
        self.base().data()
    }

    fn set_data(&self, data: Option<Payload>) {
        self.base().set_data(data);
    }

    /// Called by the model after the proxy has been stored.
    fn on_register(&self) {}

    /// Called by the model after the proxy has been dropped from its map.
    fn on_remove(&self) {}
}

/// Name, data slot and notifier shared by proxy implementations.
pub struct ProxyBase {
    name: String,
    data: RwLock<Option<Payload>>,
    notifier: Notifier,
}

impl ProxyBase {
    /// `None` falls back to [`PROXY_NAME`].
    pub fn new(name: Option<&str>, data: Option<Payload>) -> Self {
        Self {
            name: name.unwrap_or(PROXY_NAME).to_string(),
            data: RwLock::new(data),
            notifier: Notifier::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> Option<Payload> {
        self.data.read().clone()
    }

    pub fn set_data(&self, data: Option<Payload>) {
        *self.data.write() = data;
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl Notify for ProxyBase {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

/// `ProxyBase` on its own is a plain data proxy without hooks.
impl Proxy for ProxyBase {
    fn base(&self) -> &ProxyBase {
        self
    }
}
