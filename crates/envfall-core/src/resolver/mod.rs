//! Typed configuration resolution
//!
//! `ConfigResolver` works over any `EnvStore`; the `env_*` functions are
//! shorthands that resolve against the process environment.

mod config_resolver;
mod process_env;

pub use config_resolver::{ConfigResolver, Resolved, ResolutionSource};
pub use process_env::{env_bool, env_number, env_raw, env_string};
