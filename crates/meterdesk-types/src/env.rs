//! Typed environment-variable parsing for configuration overrides.
//!
//! All meterdesk tunables (staleness, retention, retry counts, warmup delay)
//! read `METERDESK_*` variables through these helpers, falling back to their
//! compiled defaults when unset or unparsable.

use std::str::FromStr;

/// Parse an environment variable, returning `None` when unset or unparsable.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse an environment variable with a fallback default.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Truthy check: "1", "true", "yes" or "on", case-insensitive.
pub fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_falls_back() {
        std::env::set_var("METERDESK_TEST_RETRIES", "4");
        assert_eq!(env_var_or("METERDESK_TEST_RETRIES", 1u32), 4);
        assert_eq!(env_var_or("METERDESK_TEST_UNSET", 1u32), 1);

        std::env::set_var("METERDESK_TEST_RETRIES", "not-a-number");
        assert_eq!(env_var_or("METERDESK_TEST_RETRIES", 1u32), 1);
        std::env::remove_var("METERDESK_TEST_RETRIES");
    }

    #[test]
    fn test_env_bool_accepts_common_truthy_forms() {
        std::env::set_var("METERDESK_TEST_FLAG", "YES");
        assert!(env_bool("METERDESK_TEST_FLAG"));
        std::env::set_var("METERDESK_TEST_FLAG", "0");
        assert!(!env_bool("METERDESK_TEST_FLAG"));
        assert!(!env_bool("METERDESK_TEST_FLAG_UNSET"));
        std::env::remove_var("METERDESK_TEST_FLAG");
    }
}
