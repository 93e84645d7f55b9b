//! Environment store registry for discovering and creating stores by name

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::file_store::FileEnvStore;
use super::memory_store::MemoryEnvStore;
use super::process_store::ProcessEnvStore;
use super::traits::EnvStore;

/// Factory function type for creating environment stores
pub type StoreFactory = Box<dyn Fn() -> Arc<dyn EnvStore> + Send + Sync>;

/// Definition of a registered environment store
pub struct StoreDefinition {
    /// Unique name for this store
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StoreFactory,
}

impl std::fmt::Debug for StoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

fn builtin(name: &str, description: &str, factory: StoreFactory) -> (String, StoreDefinition) {
    (
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    )
}

/// Global registry of environment stores
static REGISTRY: Lazy<RwLock<HashMap<String, StoreDefinition>>> = Lazy::new(|| {
    let map = HashMap::from([
        builtin(
            "process",
            "Read variables from the process environment",
            Box::new(|| Arc::new(ProcessEnvStore::new()) as Arc<dyn EnvStore>),
        ),
        builtin(
            "memory",
            "In-memory variables for testing",
            Box::new(|| Arc::new(MemoryEnvStore::new()) as Arc<dyn EnvStore>),
        ),
        builtin(
            "user",
            "YAML overrides in the user config directory",
            Box::new(|| Arc::new(FileEnvStore::user()) as Arc<dyn EnvStore>),
        ),
    ]);
    RwLock::new(map)
});

/// Register a new environment store type
///
/// Registering an existing name replaces it.
///
/// # Example
///
/// ```
/// use envfall_core::store::{register_env_store, EnvStore, MemoryEnvStore};
/// use std::sync::Arc;
///
/// register_env_store(
///     "fixtures",
///     "Canned variables",
///     Box::new(|| Arc::new(MemoryEnvStore::from_pairs([("PORT", "8080")])) as Arc<dyn EnvStore>),
/// );
/// ```
pub fn register_env_store(name: &str, description: &str, factory: StoreFactory) {
    REGISTRY.write().insert(
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create an environment store by name
///
/// Returns `None` if the name is not registered.
pub fn create_env_store(name: &str) -> Option<Arc<dyn EnvStore>> {
    REGISTRY.read().get(name).map(|def| (def.factory)())
}

/// List all registered environment stores as (name, description) pairs
pub fn list_env_stores() -> Vec<(String, String)> {
    let mut stores: Vec<(String, String)> = REGISTRY
        .read()
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    stores.sort();
    stores
}

/// Check if a store is registered
pub fn has_env_store(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Unregister an environment store (mainly for testing)
pub fn unregister_env_store(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stores_registered() {
        assert!(has_env_store("process"));
        assert!(has_env_store("memory"));
        assert!(has_env_store("user"));
    }

    #[test]
    fn test_create_builtin_stores() {
        assert_eq!(create_env_store("process").map(|s| s.name().to_string()), Some("process".to_string()));
        assert_eq!(create_env_store("memory").map(|s| s.name().to_string()), Some("memory".to_string()));
        assert_eq!(create_env_store("user").map(|s| s.name().to_string()), Some("file:user".to_string()));
    }

    #[test]
    fn test_create_unknown_store() {
        assert!(create_env_store("nonexistent_xyz").is_none());
    }

    #[test]
    fn test_list_stores() {
        let stores = list_env_stores();
        let names: Vec<_> = stores.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"process"));
        assert!(names.contains(&"memory"));
    }

    #[test]
    fn test_register_custom_store() {
        register_env_store(
            "test_custom_store",
            "A test store",
            Box::new(|| Arc::new(MemoryEnvStore::from_pairs([("PORT", "1")])) as Arc<dyn EnvStore>),
        );

        assert!(has_env_store("test_custom_store"));

        let store = create_env_store("test_custom_store").unwrap();
        assert_eq!(store.get("PORT"), Some("1".to_string()));

        assert!(unregister_env_store("test_custom_store"));
        assert!(!has_env_store("test_custom_store"));
    }
}
