//! Layered environment store with fallback behavior

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::{EnvStore, StoreError, StoreResult};

/// An environment store that layers several stores with fallback behavior
///
/// When reading, the chain tries each available store in order and returns
/// the first non-empty value. When writing, the chain writes to the designated
/// write store (default: first store).
///
/// # Example
///
/// ```
/// use envfall_core::store::{EnvStore, ChainEnvStore, MemoryEnvStore, ProcessEnvStore};
/// use std::sync::Arc;
///
/// let overrides: Arc<dyn EnvStore> = Arc::new(MemoryEnvStore::new());
/// let process: Arc<dyn EnvStore> = Arc::new(ProcessEnvStore::new());
///
/// // Try overrides first, then fall back to the process environment
/// let chain = ChainEnvStore::new(vec![overrides.clone(), process]);
///
/// // Writes go to the overrides (first store)
/// chain.set("PORT", "8080").unwrap();
/// ```
pub struct ChainEnvStore {
    stores: Vec<Arc<dyn EnvStore>>,
    write_store_index: usize,
}

impl ChainEnvStore {
    /// Create a new chain store
    ///
    /// The first store is used for writes. An empty chain is valid but
    /// reports itself unavailable.
    pub fn new(stores: Vec<Arc<dyn EnvStore>>) -> Self {
        Self {
            stores,
            write_store_index: 0,
        }
    }

    /// Create a chain store with a specific write store
    ///
    /// # Arguments
    /// * `stores` - The stores to chain, tried in order for reads
    /// * `write_store_index` - Index of the store to use for writes
    pub fn with_write_store(
        stores: Vec<Arc<dyn EnvStore>>,
        write_store_index: usize,
    ) -> StoreResult<Self> {
        if write_store_index >= stores.len() {
            return Err(StoreError::Other(format!(
                "write store index {} out of bounds for {} stores",
                write_store_index,
                stores.len()
            )));
        }
        Ok(Self {
            stores,
            write_store_index,
        })
    }

    /// Get the stores in this chain
    pub fn stores(&self) -> &[Arc<dyn EnvStore>] {
        &self.stores
    }

    /// Get the write store
    pub fn write_store(&self) -> Option<&Arc<dyn EnvStore>> {
        self.stores.get(self.write_store_index)
    }

    /// Find which store provides a key
    pub fn find_store(&self, key: &str) -> Option<&Arc<dyn EnvStore>> {
        self.stores.iter().find(|store| {
            store.is_available() && store.get(key).is_some_and(|v| !v.is_empty())
        })
    }
}

impl EnvStore for ChainEnvStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        // Chain is available if any store is available
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        for store in &self.stores {
            if !store.is_available() {
                continue;
            }
            match store.get(key) {
                Some(value) if !value.is_empty() => return Some(value),
                _ => {}
            }
        }
        None
    }

    fn entries(&self) -> Vec<(String, String)> {
        // Later stores first so earlier ones overwrite them
        let mut merged: HashMap<String, String> = HashMap::new();
        for store in self.stores.iter().rev() {
            if !store.is_available() {
                continue;
            }
            for (key, value) in store.entries() {
                if !value.is_empty() || !merged.contains_key(&key) {
                    merged.insert(key, value);
                }
            }
        }
        merged.into_iter().collect()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        match self.write_store() {
            Some(store) => store.set(key, value),
            None => Err(StoreError::NotAvailable("empty chain".to_string())),
        }
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        // Remove from every store that has the key; read-only stores keep theirs
        for store in &self.stores {
            if store.contains(key) {
                match store.remove(key) {
                    Ok(()) | Err(StoreError::ReadOnly) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }
}

// Implement Debug manually since Arc<dyn EnvStore> doesn't implement Debug
impl std::fmt::Debug for ChainEnvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainEnvStore")
            .field("stores", &names)
            .field("write_store_index", &self.write_store_index)
            .finish()
    }
}
