//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with common type conversions,
//! used by the configuration loaders in this module.
//!
//! # Examples
//! ```rust,no_run
//! use setlist_web::config::env::{read_flag, read_u32};
//!
//! let secure = read_flag("SESSION_COOKIE_SECURE", false);
//! let timeout = read_u32("BACKEND_TIMEOUT_SECS", 5);
//! ```

/// Reads a boolean flag from an environment variable.
///
/// Returns `true` for any of the following case-insensitive values:
/// `"1"`, `"true"`, `"yes"`, `"on"`.
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a boolean flag using a custom provider function.
///
/// Useful for testing or mocking environment sources.
///
/// # Example
/// ```rust
/// use setlist_web::config::env::read_flag_from;
///
/// let val = read_flag_from(|_| Some("true".into()), "SESSION_COOKIE_SECURE", false);
/// assert!(val);
/// ```
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads an unsigned integer (`u32`) from an environment variable,
/// returning the provided default if the value is missing or unparsable.
pub fn read_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Reads a string from an environment variable, returning the provided
/// default when the variable is unset or empty.
pub fn read_string(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flag_true_variants() {
        for val in ["1", "true", "TRUE", "yes", "YES", "on", "On"] {
            let got = read_flag_from(|_| Some(val.into()), "X", false);
            assert!(got, "Expected {val:?} to be truthy");
        }
    }

    #[test]
    fn read_flag_false_variants() {
        for val in ["0", "false", "no", "off", "xyz", ""] {
            let got = read_flag_from(|_| Some(val.into()), "X", true);
            assert!(!got, "Expected {val:?} to be falsy");
        }
    }

    #[test]
    fn read_flag_default_when_missing() {
        assert!(read_flag_from(|_| None, "X", true));
        assert!(!read_flag_from(|_| None, "X", false));
    }

    #[test]
    fn read_flag_strips_quotes() {
        assert!(read_flag_from(|_| Some("\"true\"".into()), "X", false));
        assert!(read_flag_from(|_| Some("'yes'".into()), "X", false));
    }

    #[test]
    fn read_u32_valid_number() {
        temp_env::with_vars(vec![("SETLIST_TEST_LIMIT", Some("42"))], || {
            assert_eq!(read_u32("SETLIST_TEST_LIMIT", 10), 42);
        });
    }

    #[test]
    fn read_u32_invalid_or_missing() {
        temp_env::with_vars(vec![("SETLIST_TEST_LIMIT", Some("not_a_number"))], || {
            assert_eq!(read_u32("SETLIST_TEST_LIMIT", 99), 99);
        });
        temp_env::with_vars(vec![("SETLIST_TEST_LIMIT", None::<&str>)], || {
            assert_eq!(read_u32("SETLIST_TEST_LIMIT", 77), 77);
        });
    }

    #[test]
    fn read_string_falls_back_on_empty() {
        temp_env::with_vars(vec![("SETLIST_TEST_STR", Some("  "))], || {
            assert_eq!(read_string("SETLIST_TEST_STR", "fallback"), "fallback");
        });
        temp_env::with_vars(vec![("SETLIST_TEST_STR", Some("value"))], || {
            assert_eq!(read_string("SETLIST_TEST_STR", "fallback"), "value");
        });
    }
}
