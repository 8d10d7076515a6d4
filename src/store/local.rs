use std::rc::Rc;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    foundation::error::{HeliographError, HeliographResult},
    store::storage::KeyValueStorage,
};

/// What happens to the in-memory cache when persisting a change fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Restore the previous cache so memory and storage stay in agreement.
    #[default]
    Rollback,
    /// Keep the new cache; memory runs ahead of storage until the next successful write.
    KeepMemory,
}

/// Storage record name and failure policy for one [`LocalStore`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    /// Storage key holding the JSON array.
    pub key: String,
    /// Behaviour on write failure.
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl StoreConfig {
    /// Config for `key` with the default [`WritePolicy`].
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            write_policy: WritePolicy::default(),
        }
    }

    /// Replace the write policy.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }
}

/// A collection cached in memory and written through to one storage record as a JSON array.
///
/// Until [`LocalStore::hydrate`] has run, reads see the default collection the store was built
/// with. Hydration happens at most once; a missing, empty, unreadable or malformed record
/// leaves the default in place. Writes hydrate first, so a change made before the explicit
/// hydration lands on the persisted collection rather than replacing it with the default.
pub struct LocalStore<T> {
    storage: Rc<dyn KeyValueStorage>,
    config: StoreConfig,
    default: Vec<T>,
    cache: Vec<T>,
    hydrated: bool,
}

impl<T> std::fmt::Debug for LocalStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("key", &self.config.key)
            .field("write_policy", &self.config.write_policy)
            .field("len", &self.cache.len())
            .field("hydrated", &self.hydrated)
            .finish()
    }
}

impl<T> LocalStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// New, unhydrated store showing `default`.
    pub fn new(storage: Rc<dyn KeyValueStorage>, config: StoreConfig, default: Vec<T>) -> Self {
        Self {
            storage,
            cache: default.clone(),
            default,
            config,
            hydrated: false,
        }
    }

    /// Current collection.
    pub fn get(&self) -> &[T] {
        &self.cache
    }

    /// `true` once hydration has completed or failed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load the persisted collection. Only the first call reads storage.
    #[tracing::instrument(skip(self), fields(key = %self.config.key))]
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;

        let raw = match self.storage.get_item(&self.config.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted record; keeping default collection");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read persisted collection; keeping default");
                return;
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) if items.is_empty() => {
                tracing::debug!("persisted collection is empty; keeping default collection");
            }
            Ok(items) => {
                tracing::debug!(len = items.len(), "hydrated collection");
                self.cache = items;
            }
            Err(err) => {
                tracing::warn!(%err, "malformed persisted collection; keeping default");
            }
        }
    }

    /// Replace the collection and persist it.
    pub fn set(&mut self, items: Vec<T>) -> HeliographResult<()> {
        self.hydrate();
        let previous = std::mem::replace(&mut self.cache, items);
        self.persist(previous)
    }

    /// Replace the collection with `f(current)` and persist it.
    pub fn set_with(&mut self, f: impl FnOnce(&[T]) -> Vec<T>) -> HeliographResult<()> {
        self.hydrate();
        let next = f(&self.cache);
        self.set(next)
    }

    /// Restore the default collection and persist it.
    pub fn reset(&mut self) -> HeliographResult<()> {
        self.set(self.default.clone())
    }

    fn persist(&mut self, previous: Vec<T>) -> HeliographResult<()> {
        let result = serde_json::to_string(&self.cache)
            .map_err(HeliographError::from)
            .and_then(|json| self.storage.set_item(&self.config.key, &json));

        let Err(err) = result else {
            return Ok(());
        };
        match self.config.write_policy {
            WritePolicy::Rollback => {
                tracing::warn!(
                    key = %self.config.key,
                    %err,
                    "write failed; rolled back in-memory change"
                );
                self.cache = previous;
            }
            WritePolicy::KeepMemory => {
                tracing::warn!(
                    key = %self.config.key,
                    %err,
                    "write failed; memory is ahead of storage"
                );
            }
        }
        Err(err)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/local.rs"]
mod tests;
