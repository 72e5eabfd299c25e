//! The core manager: key-addressed models, views, controllers and facades.
//!
//! There is no ambient global state. Applications create a [`Multicore`],
//! pass it (or a `Weak` to it) to whatever needs to reach a core, and every
//! core is looked up through it by key. Each table yields exactly one
//! instance per key, built lazily on first access.

use crate::config::RegistryConfig;
use crate::patterns::facade::Facade;
use crate::registry::{Controller, InstanceMap, Model, View};
use crate::telemetry::spans;
use std::sync::{Arc, Weak};
use tracing::info;

/// Owns every core of an application.
pub struct Multicore {
    config: RegistryConfig,
    models: InstanceMap<Model>,
    views: InstanceMap<View>,
    controllers: InstanceMap<Controller>,
    facades: InstanceMap<Facade>,
    this: Weak<Multicore>,
}

impl Multicore {
    pub fn new() -> Arc<Self> {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            config,
            models: InstanceMap::new("model"),
            views: InstanceMap::new("view"),
            controllers: InstanceMap::new("controller"),
            facades: InstanceMap::new("facade"),
            this: this.clone(),
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Handle collaborators keep to reach their core without owning it.
    pub fn downgrade(&self) -> Weak<Multicore> {
        self.this.clone()
    }

    // ========================================================================
    // Get-or-create
    // ========================================================================

    pub fn model(&self, key: &str) -> Arc<Model> {
        self.models
            .get_or_create(key, || Arc::new(Model::new(key, self.this.clone())))
    }

    pub fn view(&self, key: &str) -> Arc<View> {
        self.views.get_or_create(key, || {
            Arc::new(View::new(key, self.this.clone(), self.config.interest_tracking))
        })
    }

    /// The controller for `key`; creates the key's view too if needed.
    pub fn controller(&self, key: &str) -> Arc<Controller> {
        self.controllers
            .get_or_create(key, || Controller::new(key, self.this.clone(), self.view(key)))
    }

    /// The facade for `key`, building the whole core on first access.
    pub fn facade(&self, key: &str) -> Arc<Facade> {
        self.facade_with(key, |_| {})
    }

    /// Like [`Multicore::facade`], but runs `init` once, right after a new
    /// facade is built and before any other caller can see it. `init` is
    /// skipped when the core already exists.
    ///
    /// `init` may register commands, proxies and mediators, but must not
    /// touch the facade table at all (no `facade`, `facade_with`,
    /// `has_core` or `remove_core`, directly or through a collaborator's
    /// notifier): a whole shard of that table, not just `key`, stays locked
    /// until `init` returns.
    pub fn facade_with<F>(&self, key: &str, init: F) -> Arc<Facade>
    where
        F: FnOnce(&Facade),
    {
        self.facades.get_or_create(key, || {
            let span = spans::core(key);
            let _enter = span.enter();
            let facade = Facade::new(key, self);
            init(&facade);
            info!(core = %key, "Core initialized");
            Arc::new(facade)
        })
    }

    // ========================================================================
    // Existence
    // ========================================================================

    pub fn has_core(&self, key: &str) -> bool {
        self.facades.contains(key)
    }

    pub fn has_model(&self, key: &str) -> bool {
        self.models.contains(key)
    }

    pub fn has_view(&self, key: &str) -> bool {
        self.views.contains(key)
    }

    pub fn has_controller(&self, key: &str) -> bool {
        self.controllers.contains(key)
    }

    pub fn core_keys(&self) -> Vec<String> {
        self.facades.keys()
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Drop the facade, model, view and controller for `key`, so the next
    /// access builds a completely fresh core. Unknown keys are a no-op.
    /// Returns whether a facade existed.
    ///
    /// The cascade runs under the same facade-table lock that
    /// [`Multicore::facade_with`] holds while building, so a core under
    /// construction is either removed whole or built after the removal.
    pub fn remove_core(&self, key: &str) -> bool {
        let existed = self
            .facades
            .remove_with(key, || {
                self.models.remove(key);
                self.views.remove(key);
                self.controllers.remove(key);
            })
            .is_some();
        if existed {
            info!(core = %key, "Core removed");
        }
        existed
    }

    pub fn remove_model(&self, key: &str) {
        self.models.remove(key);
    }

    pub fn remove_view(&self, key: &str) {
        self.views.remove(key);
    }

    pub fn remove_controller(&self, key: &str) {
        self.controllers.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterestTracking;

    #[test]
    fn facade_shares_registries_with_tables() {
        let manager = Multicore::new();
        let facade = manager.facade("FacadeTestKey1");

        assert!(Arc::ptr_eq(facade.model(), &manager.model("FacadeTestKey1")));
        assert!(Arc::ptr_eq(facade.view(), &manager.view("FacadeTestKey1")));
        assert!(Arc::ptr_eq(facade.controller(), &manager.controller("FacadeTestKey1")));
    }

    #[test]
    fn controller_creates_its_view() {
        let manager = Multicore::new();
        assert!(!manager.has_view("k"));
        manager.controller("k");
        assert!(manager.has_view("k"));
        assert!(manager.has_controller("k"));
        assert!(!manager.has_model("k"));
        assert!(!manager.has_core("k"));
    }

    #[test]
    fn remove_core_cascades() {
        let manager = Multicore::new();
        manager.facade("gone");
        assert!(manager.has_model("gone") && manager.has_view("gone") && manager.has_controller("gone"));

        assert!(manager.remove_core("gone"));
        assert!(!manager.has_core("gone"));
        assert!(!manager.has_model("gone"));
        assert!(!manager.has_view("gone"));
        assert!(!manager.has_controller("gone"));
        assert!(!manager.remove_core("gone"));
    }

    #[test]
    fn individual_removal_leaves_siblings() {
        let manager = Multicore::new();
        manager.facade("k");
        manager.remove_view("k");
        assert!(!manager.has_view("k"));
        assert!(manager.has_model("k"));
        manager.remove_model("k");
        manager.remove_controller("k");
        assert!(manager.has_core("k"));
    }

    #[test]
    fn core_keys_lists_facades() {
        let manager = Multicore::new();
        manager.facade("a");
        manager.facade("b");
        manager.view("view-only");

        let mut keys = manager.core_keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn config_is_kept() {
        let manager = Multicore::with_config(RegistryConfig {
            interest_tracking: InterestTracking::Requery,
        });
        assert_eq!(manager.config().interest_tracking, InterestTracking::Requery);
        assert!(manager.downgrade().upgrade().is_some());
    }
}
