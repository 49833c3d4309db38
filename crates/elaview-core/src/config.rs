//! Environment-variable helpers for service `*Config::from_env()` loaders.

use std::str::FromStr;

/// Read a required environment variable.
///
/// # Panics
///
/// Panics with the variable name if it is unset — config problems should
/// abort startup, not surface later as request failures.
pub fn required(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}

/// Read an optional environment variable, parsing it into `T`.
///
/// Unset or unparseable values fall back to `default`.
pub fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_default_when_var_unset() {
        assert_eq!(parse_or::<u16>("ELAVIEW_TEST_UNSET_PORT", 3300), 3300);
    }

    #[test]
    fn should_parse_set_var() {
        // SAFETY: test-local variable name, no concurrent reader outside this test.
        unsafe { std::env::set_var("ELAVIEW_TEST_SET_PORT", "8080") };
        assert_eq!(parse_or::<u16>("ELAVIEW_TEST_SET_PORT", 3300), 8080);
    }

    #[test]
    fn should_fall_back_when_var_unparseable() {
        unsafe { std::env::set_var("ELAVIEW_TEST_BAD_PORT", "not-a-port") };
        assert_eq!(parse_or::<u16>("ELAVIEW_TEST_BAD_PORT", 3300), 3300);
    }
}
