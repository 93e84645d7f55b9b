//! Raw configuration values and their coercions
//!
//! A `RawValue` is either something read from an environment store (always a
//! `String`) or a caller-supplied default of any shape. The typed accessors on
//! `ConfigResolver` coerce a `RawValue` into `bool`, `Option<String>` or `f64`
//! using the functions in this module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A configuration value before typed coercion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// No value at all
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl RawValue {
    /// Whether the value counts as present
    ///
    /// `Null`, `false`, `0`, `NaN` and the empty string are not truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::String(s) => !s.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Borrow the inner string, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to a boolean
    ///
    /// Strings are `true` only when they are exactly `"true"`. Other values
    /// fall back to truthiness.
    pub fn to_bool(&self) -> bool {
        match self {
            RawValue::String(s) => s == "true",
            other => other.is_truthy(),
        }
    }

    /// Coerce to a string, passing `Null` through as `None`
    pub fn to_string_opt(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Coerce to a number
    ///
    /// Strings go through [`parse_int`], numbers are returned unchanged and
    /// everything else is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            RawValue::String(s) => parse_int(s),
            RawValue::Number(n) => *n,
            RawValue::Null | RawValue::Bool(_) => f64::NAN,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Number(n) => write!(f, "{}", format_number(*n)),
            RawValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Render a number the way a script runtime prints it (`5`, `1.5`, `NaN`)
///
/// Magnitudes of `1e21` and above or below `1e-6` use exponent form with a
/// signed exponent (`1e+21`, `1e-7`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let label = if n > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

/// Parse the leading base-10 integer of a string
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit. Returns `NaN` when no digit is found, so `"12px"` is `12`
/// and `"abc"` is `NaN`.
pub fn parse_int(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return f64::NAN;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0.0_f64, |acc, b| acc * 10.0 + f64::from(b - b'0'));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u16> for RawValue {
    fn from(value: u16) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!RawValue::Null.is_truthy());
        assert!(!RawValue::from("").is_truthy());
        assert!(!RawValue::from(0).is_truthy());
        assert!(!RawValue::from(f64::NAN).is_truthy());
        assert!(!RawValue::from(false).is_truthy());

        assert!(RawValue::from("0").is_truthy());
        assert!(RawValue::from("false").is_truthy());
        assert!(RawValue::from(-1).is_truthy());
        assert!(RawValue::from(true).is_truthy());
    }

    #[test]
    fn test_to_bool_requires_exact_literal() {
        assert!(RawValue::from("true").to_bool());
        assert!(!RawValue::from("True").to_bool());
        assert!(!RawValue::from("TRUE").to_bool());
        assert!(!RawValue::from("1").to_bool());
        assert!(!RawValue::from("yes").to_bool());

        // Non-strings use truthiness
        assert!(RawValue::from(true).to_bool());
        assert!(RawValue::from(3).to_bool());
        assert!(!RawValue::Null.to_bool());
    }

    #[test]
    fn test_to_string_opt() {
        assert_eq!(RawValue::Null.to_string_opt(), None);
        assert_eq!(RawValue::from("x").to_string_opt(), Some("x".to_string()));
        assert_eq!(RawValue::from(5).to_string_opt(), Some("5".to_string()));
        assert_eq!(RawValue::from(1.5).to_string_opt(), Some("1.5".to_string()));
        assert_eq!(RawValue::from(-0.0).to_string_opt(), Some("0".to_string()));
        assert_eq!(RawValue::from(f64::NAN).to_string_opt(), Some("NaN".to_string()));
        assert_eq!(
            RawValue::from(f64::NEG_INFINITY).to_string_opt(),
            Some("-Infinity".to_string())
        );
        assert_eq!(RawValue::from(false).to_string_opt(), Some("false".to_string()));
    }

    #[test]
    fn test_exponent_rendering() {
        assert_eq!(RawValue::from(1e21).to_string(), "1e+21");
        assert_eq!(RawValue::from(-1.5e22).to_string(), "-1.5e+22");
        assert_eq!(RawValue::from(1e-7).to_string(), "1e-7");
        assert_eq!(RawValue::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(RawValue::from(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn test_to_number() {
        assert_eq!(RawValue::from("5").to_number(), 5.0);
        assert_eq!(RawValue::from(42).to_number(), 42.0);
        assert!(RawValue::from("abc").to_number().is_nan());
        assert!(RawValue::Null.to_number().is_nan());
        assert!(RawValue::from(true).to_number().is_nan());
    }

    #[test]
    fn test_parse_int_prefix_semantics() {
        assert_eq!(parse_int("8080"), 8080.0);
        assert_eq!(parse_int("  42"), 42.0);
        assert_eq!(parse_int("-7"), -7.0);
        assert_eq!(parse_int("+3"), 3.0);
        assert_eq!(parse_int("12px"), 12.0);
        assert_eq!(parse_int("3.9"), 3.0);
        assert_eq!(parse_int("007"), 7.0);

        assert!(parse_int("").is_nan());
        assert!(parse_int("abc").is_nan());
        assert!(parse_int("-").is_nan());
        assert!(parse_int("- 1").is_nan());
        assert_eq!(parse_int("0x1A"), 0.0);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawValue::from(None::<&str>), RawValue::Null);
        assert_eq!(RawValue::from(Some("a")), RawValue::from("a"));
    }

    #[test]
    fn test_deserialize_scalars() {
        let parsed: std::collections::HashMap<String, RawValue> =
            serde_yaml::from_str("PORT: 8080\nDEBUG: true\nNAME: app\nEMPTY: ~\n").unwrap();

        assert_eq!(parsed["PORT"], RawValue::Number(8080.0));
        assert_eq!(parsed["DEBUG"], RawValue::Bool(true));
        assert_eq!(parsed["NAME"], RawValue::from("app"));
        assert_eq!(parsed["EMPTY"], RawValue::Null);
    }
}
