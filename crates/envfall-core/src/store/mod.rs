//! Environment store abstractions and implementations
//!
//! This module provides a pluggable key-value environment layer with:
//! - `EnvStore` trait for implementing custom stores
//! - Built-in implementations: `ProcessEnvStore`, `MemoryEnvStore`, `FileEnvStore`, `ChainEnvStore`
//! - A registry for discovering and creating stores by name

mod traits;
mod process_store;
mod memory_store;
mod file_store;
mod chain_store;
mod registry;

pub use traits::{EnvStore, StoreError, StoreResult};
pub use process_store::ProcessEnvStore;
pub use memory_store::MemoryEnvStore;
pub use file_store::{FileEnvStore, FileLevel};
pub use chain_store::ChainEnvStore;
pub use registry::{
    register_env_store, create_env_store, list_env_stores, has_env_store,
    unregister_env_store, StoreDefinition, StoreFactory,
};
