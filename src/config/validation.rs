//! Config errors and value parsing helpers.

use std::sync::OnceLock;
use std::time::Duration;

use regex::{Captures, Regex};
use thiserror::Error;

/// Errors raised while loading a check configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be opened or read.
    #[error("cannot read check config: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid YAML or a field has the wrong shape.
    #[error("malformed check config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// A required field is missing or out of range after overrides.
    #[error("invalid check config: {0}")]
    ValidationError(String),
}

/// Parse a human-readable duration such as `500ms`, `10s` or `1m30s`.
///
/// Used as the clap value parser for `--timeout`.
///
/// # Examples
///
/// ```
/// use waitfor_http::config::parse_duration;
///
/// assert_eq!(parse_duration("10s").unwrap().as_secs(), 10);
/// assert_eq!(parse_duration("1m30s").unwrap().as_secs(), 90);
/// assert!(parse_duration("0s").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("duration string is empty".to_string());
    }
    let duration = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("duration must be non-zero".to_string());
    }
    Ok(duration)
}

/// Expand `${VAR}` and `${VAR:-default}` references from the environment.
///
/// Unset variables without a default expand to the empty string.
pub fn expand_env_vars(input: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var pattern is valid")
    });

    pattern
        .replace_all(input, |caps: &Captures| {
            let fallback = caps.get(2).map_or("", |m| m.as_str());
            std::env::var(&caps[1]).unwrap_or_else(|_| fallback.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::ValidationError("url is required".to_string());
        assert_eq!(err.to_string(), "invalid check config: url is required");

        let err = ConfigError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("cannot read check config: "));
    }

    #[test]
    fn test_parse_duration_valid() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("ten").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("0ms").is_err());
    }

    #[test]
    fn test_expand_env_vars_plain() {
        assert_eq!(
            expand_env_vars("http://localhost:8080/healthz"),
            "http://localhost:8080/healthz"
        );
    }

    #[test]
    fn test_expand_env_vars_unset() {
        assert_eq!(
            expand_env_vars("http://${NONEXISTENT_WAITFOR_HOST_9876:-fallback}/"),
            "http://fallback/"
        );
        assert_eq!(expand_env_vars("x${NONEXISTENT_WAITFOR_HOST_9876}y"), "xy");
    }

    #[test]
    fn test_expand_env_vars_from_env() {
        // SAFETY: test-specific variable, not read by any other test.
        unsafe {
            std::env::set_var("WAITFOR_HTTP_TEST_PORT", "9443");
        }
        assert_eq!(
            expand_env_vars("https://api:${WAITFOR_HTTP_TEST_PORT:-443}/ready"),
            "https://api:9443/ready"
        );
        // SAFETY: cleanup of the variable set above.
        unsafe {
            std::env::remove_var("WAITFOR_HTTP_TEST_PORT");
        }
    }
}
