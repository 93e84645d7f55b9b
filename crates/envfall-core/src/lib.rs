//! envfall core
//!
//! Typed environment-variable resolution with multi-key and case-insensitive
//! fallback. A lookup names several acceptable keys for one setting, tries
//! them exactly and then case-insensitively, and falls back to a default.
//! Lookups never fail.
//!
//! ```rust
//! use std::sync::Arc;
//! use envfall_core::{ConfigResolver, MemoryEnvStore};
//!
//! let store = Arc::new(MemoryEnvStore::from_pairs([
//!     ("port", "8080"),
//!     ("FEATURE_X", "true"),
//! ]));
//! let config = ConfigResolver::new(store);
//!
//! assert_eq!(config.resolve_number(3000, &["PORT", "HTTP_PORT"]), 8080.0);
//! assert!(config.resolve_bool(false, &["FEATURE_X"]));
//! assert_eq!(config.resolve_string("info", &["LOG_LEVEL"]), Some("info".to_string()));
//! ```

pub mod value;
pub mod store;
pub mod logging;
pub mod resolver;

pub use value::{parse_int, RawValue};

pub use store::{
    EnvStore, StoreError, StoreResult,
    ProcessEnvStore, MemoryEnvStore, FileEnvStore, FileLevel, ChainEnvStore,
    register_env_store, create_env_store, list_env_stores,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, SharedLogger};

pub use resolver::{
    ConfigResolver, Resolved, ResolutionSource,
    env_raw, env_bool, env_string, env_number,
};
