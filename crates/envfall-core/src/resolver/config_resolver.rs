//! Typed configuration resolution over an environment store
//!
//! Each lookup tries a list of candidate keys in priority order:
//! 1. Exact key match, candidate by candidate
//! 2. Case-insensitive match against a lowercase copy of the whole store,
//!    built once per call and only when pass 1 found nothing
//! 3. The caller's default
//!
//! Empty values never count as a match. Nothing is cached between calls, and
//! no lookup can fail: every path ends in a value (or `NaN` for numbers).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::logging::{NoOpLogger, SharedLogger};
use crate::store::{create_env_store, ChainEnvStore, EnvStore, FileEnvStore, ProcessEnvStore};
use crate::value::RawValue;
use crate::{log_debug, warn_log};

/// How a value was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// A candidate key matched exactly
    Exact { key: String },
    /// A candidate matched a store key that differs only in case
    CaseInsensitive {
        /// The candidate as the caller wrote it
        key: String,
        /// The key as it appears in the store
        matched: String,
    },
    /// Nothing matched; the default was returned
    Default,
}

/// A resolved value with source tracking
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: RawValue,
    pub source: ResolutionSource,
}

impl Resolved {
    fn default_value(value: RawValue) -> Self {
        Self {
            value,
            source: ResolutionSource::Default,
        }
    }

    /// Whether the caller's default was used
    pub fn is_default(&self) -> bool {
        self.source == ResolutionSource::Default
    }

    /// The store key that supplied the value, if any
    pub fn matched_key(&self) -> Option<&str> {
        match &self.source {
            ResolutionSource::Exact { key } => Some(key),
            ResolutionSource::CaseInsensitive { matched, .. } => Some(matched),
            ResolutionSource::Default => None,
        }
    }
}

/// Resolver for typed configuration values
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use envfall_core::resolver::ConfigResolver;
/// use envfall_core::store::MemoryEnvStore;
///
/// let store = Arc::new(MemoryEnvStore::from_pairs([("server_port", "3000")]));
/// let config = ConfigResolver::new(store);
///
/// assert_eq!(config.resolve_number(0, &["SERVER_PORT", "PORT"]), 3000.0);
/// assert!(!config.resolve_bool(false, &["DEBUG"]));
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    store: Option<Arc<dyn EnvStore>>,
    logger: SharedLogger,
}

impl ConfigResolver {
    /// Create a resolver over a specific store
    pub fn new(store: Arc<dyn EnvStore>) -> Self {
        Self {
            store: Some(store),
            logger: NoOpLogger::shared(),
        }
    }

    /// Create a resolver over the process environment
    pub fn process() -> Self {
        Self::new(Arc::new(ProcessEnvStore::new()))
    }

    /// Create a resolver with no store; every lookup yields its default
    pub fn without_store() -> Self {
        Self {
            store: None,
            logger: NoOpLogger::shared(),
        }
    }

    /// Process environment first, then workspace overrides, then user overrides
    pub fn layered(workspace_root: Option<&Path>) -> Self {
        let mut stores: Vec<Arc<dyn EnvStore>> = vec![Arc::new(ProcessEnvStore::new())];
        if let Some(root) = workspace_root {
            stores.push(Arc::new(FileEnvStore::workspace(root)));
        }
        stores.push(Arc::new(FileEnvStore::user()));
        Self::new(Arc::new(ChainEnvStore::new(stores)))
    }

    /// Chain registered stores by name, in priority order
    ///
    /// Unknown names are skipped. If none are known the resolver has no
    /// usable store and returns defaults.
    pub fn from_store_names(names: &[&str]) -> Self {
        let stores: Vec<Arc<dyn EnvStore>> = names
            .iter()
            .filter_map(|name| {
                let store = create_env_store(name);
                if store.is_none() {
                    warn_log!("Unknown environment store '{}', skipping", name);
                }
                store
            })
            .collect();
        Self::new(Arc::new(ChainEnvStore::new(stores)))
    }

    /// Attach a logger for resolution tracing
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// The configured store, if any
    pub fn store(&self) -> Option<&Arc<dyn EnvStore>> {
        self.store.as_ref()
    }

    /// Resolve a value and report where it came from
    pub fn resolve_traced<K: AsRef<str>>(
        &self,
        default: impl Into<RawValue>,
        keys: &[K],
    ) -> Resolved {
        let default = default.into();

        let store = match self.store.as_ref().filter(|s| s.is_available()) {
            Some(store) => store,
            None => {
                log_debug!(self.logger, "No environment store available for [{}], using default", join_keys(keys));
                return Resolved::default_value(default);
            }
        };

        // Pass 1: exact keys
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = store.get(key).filter(|v| !v.is_empty()) {
                log_debug!(self.logger, "Resolved '{}' from {}", key, store.name());
                return Resolved {
                    value: RawValue::String(value),
                    source: ResolutionSource::Exact {
                        key: key.to_string(),
                    },
                };
            }
        }

        // Pass 2: case-insensitive, over a fresh lowercase copy of the store
        if !keys.is_empty() {
            let index = lowercase_index(&**store);
            for key in keys {
                let key = key.as_ref();
                if let Some((matched, value)) = index.get(&key.to_lowercase()) {
                    log_debug!(self.logger, "Resolved '{}' as '{}' from {} (case-insensitive)", key, matched, store.name());
                    return Resolved {
                        value: RawValue::String(value.clone()),
                        source: ResolutionSource::CaseInsensitive {
                            key: key.to_string(),
                            matched: matched.clone(),
                        },
                    };
                }
            }
        }

        log_debug!(self.logger, "No match for [{}] in {}, using default", join_keys(keys), store.name());
        Resolved::default_value(default)
    }

    /// Resolve a value without coercion
    ///
    /// Returns the first non-empty store value for the candidate keys, or
    /// `default` unchanged.
    pub fn resolve_raw<K: AsRef<str>>(&self, default: impl Into<RawValue>, keys: &[K]) -> RawValue {
        self.resolve_traced(default, keys).value
    }

    /// Resolve a boolean
    ///
    /// Store values are `true` only if they are exactly `"true"`. A non-string
    /// default is coerced by truthiness.
    pub fn resolve_bool<K: AsRef<str>>(&self, default: impl Into<RawValue>, keys: &[K]) -> bool {
        self.resolve_raw(default, keys).to_bool()
    }

    /// Resolve a string
    ///
    /// A `Null` default passes through as `None`; other defaults are
    /// stringified.
    pub fn resolve_string<K: AsRef<str>>(
        &self,
        default: impl Into<RawValue>,
        keys: &[K],
    ) -> Option<String> {
        self.resolve_raw(default, keys).to_string_opt()
    }

    /// Resolve a number
    ///
    /// Store values are parsed as a leading base-10 integer. Returns `NaN`
    /// when parsing fails or the default is not a number.
    pub fn resolve_number<K: AsRef<str>>(&self, default: impl Into<RawValue>, keys: &[K]) -> f64 {
        self.resolve_raw(default, keys).to_number()
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::process()
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("store", &self.store.as_ref().map(|s| s.name()))
            .finish()
    }
}

/// Lowercased key -> (original key, value), skipping empty values
///
/// When several keys fold to the same lowercase form, the lexicographically
/// smallest original key wins so the result does not depend on store order.
fn lowercase_index(store: &dyn EnvStore) -> HashMap<String, (String, String)> {
    let mut index: HashMap<String, (String, String)> = HashMap::new();
    for (key, value) in store.entries() {
        if value.is_empty() {
            continue;
        }
        let lower = key.to_lowercase();
        let keep_existing = index
            .get(&lower)
            .is_some_and(|(existing, _)| *existing <= key);
        if !keep_existing {
            index.insert(lower, (key, value));
        }
    }
    index
}

fn join_keys<K: AsRef<str>>(keys: &[K]) -> String {
    keys.iter().map(|k| k.as_ref()).collect::<Vec<&str>>().join(", ")
}
