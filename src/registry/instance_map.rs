//! Per-key instance tables.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Extension helpers for `DashMap` that drop shard guards immediately.
///
/// `DashMap::get()` returns a guard holding a shard lock. Callers that go on
/// to run user code must not keep it alive, or a re-entrant lookup on the
/// same shard deadlocks.
pub trait DashMapExt<K, V> {
    /// Clone the value for `key` (dropping the DashMap guard immediately).
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone;

    /// Clone every key (dropping guards immediately).
    fn keys_cloned(&self) -> Vec<K>
    where
        K: Clone;
}

impl<K, V> DashMapExt<K, V> for DashMap<K, V>
where
    K: Eq + Hash,
{
    fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).map(|r| r.value().clone())
    }

    fn keys_cloned(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|e| e.key().clone()).collect()
    }
}

/// A table of at most one shared instance per core key.
pub struct InstanceMap<T> {
    kind: &'static str,
    instances: DashMap<String, Arc<T>>,
}

impl<T> InstanceMap<T> {
    /// `kind` names the registry in log output ("model", "view", ...).
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            instances: DashMap::new(),
        }
    }

    /// Return the instance for `key`, building it with `create` if absent.
    ///
    /// Construction runs while the key's shard is write-locked, so concurrent
    /// callers for the same key block until the instance is complete and all
    /// of them receive it; `create` runs at most once per key. `create` must
    /// not touch this table at all: any key hashing to the locked shard,
    /// not only `key`, deadlocks.
    pub fn get_or_create<F>(&self, key: &str, create: F) -> Arc<T>
    where
        F: FnOnce() -> Arc<T>,
    {
        if let Some(existing) = self.instances.get_cloned(key) {
            return existing;
        }

        self.instances
            .entry(key.to_string())
            .or_insert_with(|| {
                debug!(kind = self.kind, core = %key, "Creating instance");
                create()
            })
            .value()
            .clone()
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.instances.get_cloned(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    /// Forget the instance for `key`. Unknown keys are a no-op.
    pub fn remove(&self, key: &str) -> Option<Arc<T>> {
        let removed = self.instances.remove(key).map(|(_, v)| v);
        if removed.is_some() {
            debug!(kind = self.kind, core = %key, "Removed instance");
        }
        removed
    }

    /// Run `cascade`, then forget the instance for `key`, all while the
    /// key's shard is write-locked. A `get_or_create` for `key` therefore
    /// either completes before `cascade` starts or begins after the removal.
    /// `cascade` runs whether or not an instance exists, and has the same
    /// restriction as `create` in [`InstanceMap::get_or_create`].
    pub fn remove_with<F>(&self, key: &str, cascade: F) -> Option<Arc<T>>
    where
        F: FnOnce(),
    {
        let entry = self.instances.entry(key.to_string());
        cascade();
        match entry {
            Entry::Occupied(occupied) => {
                debug!(kind = self.kind, core = %key, "Removed instance");
                Some(occupied.remove())
            }
            Entry::Vacant(_) => None,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.instances.keys_cloned()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
