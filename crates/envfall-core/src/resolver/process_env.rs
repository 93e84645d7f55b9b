//! Shorthands over the process environment

use super::config_resolver::ConfigResolver;
use crate::value::RawValue;

/// Resolve a raw value from the process environment
pub fn env_raw<K: AsRef<str>>(default: impl Into<RawValue>, keys: &[K]) -> RawValue {
    ConfigResolver::process().resolve_raw(default, keys)
}

/// Resolve a boolean from the process environment
///
/// ```
/// use envfall_core::env_bool;
///
/// let verbose = env_bool(false, &["VERBOSE", "APP_VERBOSE"]);
/// # let _ = verbose;
/// ```
pub fn env_bool<K: AsRef<str>>(default: impl Into<RawValue>, keys: &[K]) -> bool {
    ConfigResolver::process().resolve_bool(default, keys)
}

/// Resolve a string from the process environment
pub fn env_string<K: AsRef<str>>(default: impl Into<RawValue>, keys: &[K]) -> Option<String> {
    ConfigResolver::process().resolve_string(default, keys)
}

/// Resolve a number from the process environment
pub fn env_number<K: AsRef<str>>(default: impl Into<RawValue>, keys: &[K]) -> f64 {
    ConfigResolver::process().resolve_number(default, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_env_shorthands() {
        env::set_var("ENVFALL_TEST_SHORTHAND_PORT", "8080");
        env::set_var("envfall_test_shorthand_flag", "true");

        assert_eq!(env_number(0, &["ENVFALL_TEST_SHORTHAND_PORT"]), 8080.0);
        assert_eq!(
            env_string("x", &["ENVFALL_TEST_SHORTHAND_PORT"]),
            Some("8080".to_string())
        );
        assert!(env_bool(false, &["ENVFALL_TEST_SHORTHAND_FLAG"]));
        assert_eq!(
            env_raw("d", &["ENVFALL_TEST_SHORTHAND_UNSET"]),
            RawValue::from("d")
        );

        env::remove_var("ENVFALL_TEST_SHORTHAND_PORT");
        env::remove_var("envfall_test_shorthand_flag");
    }
}
