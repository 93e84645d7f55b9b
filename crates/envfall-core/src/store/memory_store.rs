//! In-memory environment store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{EnvStore, StoreResult};

/// In-memory environment store for testing and embedding
///
/// Fully read-write. Lets resolver behavior be exercised deterministically
/// without touching the real process environment.
///
/// # Thread Safety
///
/// The store uses `RwLock` internally and is safe to use from multiple threads.
///
/// # Example
///
/// ```
/// use envfall_core::store::{EnvStore, MemoryEnvStore};
///
/// let store = MemoryEnvStore::new();
/// store.set("PORT", "8080").unwrap();
/// assert_eq!(store.get("PORT"), Some("8080".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvStore {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnvStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            vars: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial values
    pub fn with_vars(initial: HashMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(initial),
        }
    }

    /// Create a memory store from key-value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::with_vars(vars)
    }

    /// Clear all variables from the store
    pub fn clear(&self) {
        self.vars.write().clear();
    }

    /// Get the number of variables in the store
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnvStore for MemoryEnvStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.vars
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.vars.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.vars.write().remove(key);
        Ok(())
    }
}

impl Clone for MemoryEnvStore {
    fn clone(&self) -> Self {
        Self {
            vars: RwLock::new(self.vars.read().clone()),
        }
    }
}
