//! Core traits and types for environment stores

use thiserror::Error;

/// Errors that can occur during environment store operations
///
/// Resolution itself never surfaces these; they only come back from
/// explicit mutation and file I/O calls.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store is read-only")]
    ReadOnly,

    #[error("Variable not found: {0}")]
    NotFound(String),

    #[error("Store not available: {0}")]
    NotAvailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store error: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A key-value source of environment variables
///
/// Implementations:
/// - `ProcessEnvStore`: the real process environment (read-only)
/// - `MemoryEnvStore`: in-memory map for tests and embedding
/// - `FileEnvStore`: YAML file of overrides
/// - `ChainEnvStore`: layered fallback over other stores
///
/// # Example
///
/// ```
/// use envfall_core::store::{EnvStore, MemoryEnvStore};
///
/// let store = MemoryEnvStore::from_pairs([("PORT", "8080")]);
/// assert_eq!(store.get("PORT"), Some("8080".to_string()));
/// ```
pub trait EnvStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Check if this store is available
    ///
    /// An unavailable store is treated by the resolver as if it were absent.
    fn is_available(&self) -> bool {
        true
    }

    /// Look up a variable by its exact key
    fn get(&self, key: &str) -> Option<String>;

    /// Snapshot of every key-value pair in the store
    fn entries(&self) -> Vec<(String, String)>;

    /// Set a variable
    ///
    /// Returns `Err(StoreError::ReadOnly)` if the store doesn't support writing.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a variable
    ///
    /// Returns `Err(StoreError::ReadOnly)` if the store doesn't support deletion.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Check if a variable exists
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
