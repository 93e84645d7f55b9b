//! Process environment store

use std::env;
use std::ffi::OsString;

use super::traits::{EnvStore, StoreError, StoreResult};

/// Environment store backed by the real process environment
///
/// This store is read-only: it reads `std::env` but never sets or removes
/// variables. Values that are not valid UTF-8 are converted lossily, and keys
/// the OS cannot represent (empty, or containing `=` or NUL) are simply absent.
///
/// # Example
///
/// ```
/// use envfall_core::store::{EnvStore, ProcessEnvStore};
///
/// let store = ProcessEnvStore::new();
/// let _path = store.get("PATH");
/// ```
#[derive(Debug, Default)]
pub struct ProcessEnvStore {
    _private: (), // Prevent direct construction, use new()
}

impl ProcessEnvStore {
    /// Create a new process environment store
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['=', '\0'])
    }

    fn lossy(value: OsString) -> String {
        value
            .into_string()
            .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
    }
}

impl EnvStore for ProcessEnvStore {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        if !Self::is_valid_key(key) {
            return None;
        }
        env::var_os(key).map(Self::lossy)
    }

    fn entries(&self) -> Vec<(String, String)> {
        env::vars_os()
            .map(|(key, value)| (Self::lossy(key), Self::lossy(value)))
            .collect()
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::ReadOnly)
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_store_name() {
        let store = ProcessEnvStore::new();
        assert_eq!(store.name(), "process");
    }

    #[test]
    fn test_process_store_read_only() {
        let store = ProcessEnvStore::new();
        assert!(matches!(store.set("test", "value"), Err(StoreError::ReadOnly)));
        assert!(matches!(store.remove("test"), Err(StoreError::ReadOnly)));
    }

    #[test]
    fn test_process_store_get_direct() {
        env::set_var("ENVFALL_TEST_PROCESS_GET", "test_value");

        let store = ProcessEnvStore::new();
        assert_eq!(
            store.get("ENVFALL_TEST_PROCESS_GET"),
            Some("test_value".to_string())
        );

        env::remove_var("ENVFALL_TEST_PROCESS_GET");
    }

    #[test]
    fn test_process_store_entries_include_vars() {
        env::set_var("ENVFALL_TEST_PROCESS_ENTRIES", "listed");

        let store = ProcessEnvStore::new();
        let entries = store.entries();
        assert!(entries
            .iter()
            .any(|(k, v)| k == "ENVFALL_TEST_PROCESS_ENTRIES" && v == "listed"));

        env::remove_var("ENVFALL_TEST_PROCESS_ENTRIES");
    }

    #[test]
    fn test_process_store_invalid_keys_are_absent() {
        let store = ProcessEnvStore::new();
        assert_eq!(store.get(""), None);
        assert_eq!(store.get("A=B"), None);
        assert_eq!(store.get("NUL\0KEY"), None);
    }

    #[test]
    fn test_process_store_not_found() {
        let store = ProcessEnvStore::new();
        assert_eq!(store.get("ENVFALL_TEST_DEFINITELY_UNSET_XYZ"), None);
        assert!(!store.contains("ENVFALL_TEST_DEFINITELY_UNSET_XYZ"));
    }
}
